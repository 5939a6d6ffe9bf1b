//! Access to the PredictHQ events-intelligence API.

pub mod client;
pub mod types;

use async_trait::async_trait;

use crate::error::LookupError;
pub use client::{PredictHqClient, DEFAULT_BASE_URL};
pub use types::{
    DailyAttendance, DemandSignals, EventCount, RadiusQuery, SignalQuery, SuggestedRadius,
    SurgeDate,
};

/// The endpoints the dashboard consumes. Implemented over HTTP by
/// [`PredictHqClient`] and by in-memory doubles in tests.
#[async_trait]
pub trait EventsApi: Send + Sync {
    async fn suggested_radius(&self, query: &RadiusQuery) -> Result<SuggestedRadius, LookupError>;

    async fn event_count(&self, query: &SignalQuery) -> Result<EventCount, LookupError>;

    async fn attendance(&self, query: &SignalQuery) -> Result<Vec<DailyAttendance>, LookupError>;

    async fn demand_surge(&self, query: &SignalQuery) -> Result<Vec<SurgeDate>, LookupError>;
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::Map;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Canned API that records how often each endpoint is hit.
    #[derive(Default)]
    pub struct CountingApi {
        pub radius: Option<f64>,
        pub fail: bool,
        pub radius_calls: Arc<AtomicUsize>,
        pub signal_calls: Arc<AtomicUsize>,
    }

    impl CountingApi {
        pub fn returning(radius: f64) -> Self {
            Self {
                radius: Some(radius),
                ..Self::default()
            }
        }

        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        pub fn radius_calls(&self) -> usize {
            self.radius_calls.load(Ordering::SeqCst)
        }

        pub fn signal_calls(&self) -> usize {
            self.signal_calls.load(Ordering::SeqCst)
        }

        fn outage() -> LookupError {
            LookupError::Status {
                status: 503,
                body: "unavailable".to_string(),
            }
        }
    }

    #[async_trait]
    impl EventsApi for CountingApi {
        async fn suggested_radius(
            &self,
            query: &RadiusQuery,
        ) -> Result<SuggestedRadius, LookupError> {
            self.radius_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(Self::outage());
            }
            Ok(SuggestedRadius {
                radius: self.radius.unwrap_or(1.0),
                radius_unit: Some(query.unit),
                metadata: Map::new(),
            })
        }

        async fn event_count(&self, _query: &SignalQuery) -> Result<EventCount, LookupError> {
            self.signal_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(Self::outage());
            }
            Ok(EventCount {
                count: 42,
                categories: [("concerts".to_string(), 30), ("sports".to_string(), 12)]
                    .into_iter()
                    .collect(),
            })
        }

        async fn attendance(
            &self,
            query: &SignalQuery,
        ) -> Result<Vec<DailyAttendance>, LookupError> {
            if self.fail {
                return Err(Self::outage());
            }
            Ok(vec![DailyAttendance {
                date: query.date_from,
                total: 5000.0,
                by_category: [("concerts".to_string(), 5000.0)].into_iter().collect(),
            }])
        }

        async fn demand_surge(&self, query: &SignalQuery) -> Result<Vec<SurgeDate>, LookupError> {
            if self.fail {
                return Err(Self::outage());
            }
            let date = query
                .date_from
                .succ_opt()
                .unwrap_or(NaiveDate::MIN);
            Ok(vec![SurgeDate {
                date,
                metrics: Map::new(),
            }])
        }
    }
}
