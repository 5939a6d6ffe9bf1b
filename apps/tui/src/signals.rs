//! Demand signals for the main panel: event count, predicted attendance and
//! demand surge for the selected area and period.

use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::cache::{MemoCache, MemoryCache};
use crate::error::LookupError;
use crate::predicthq::types::valid_coordinates;
use crate::predicthq::{DemandSignals, EventsApi, SignalQuery};

pub type SignalCache = MemoryCache<SignalQuery, DemandSignals>;

pub struct SignalService<C = SignalCache> {
    api: Arc<dyn EventsApi>,
    cache: C,
}

impl SignalService {
    pub fn new(api: Arc<dyn EventsApi>) -> Self {
        Self::with_cache(api, SignalCache::new())
    }
}

impl<C: MemoCache<SignalQuery, DemandSignals>> SignalService<C> {
    pub fn with_cache(api: Arc<dyn EventsApi>, cache: C) -> Self {
        Self { api, cache }
    }

    /// Fetches all three signals, sequentially. Any failure aborts the fetch and
    /// nothing is cached for the query.
    #[instrument(level = "debug", skip(self))]
    pub async fn fetch(&self, query: SignalQuery) -> Result<DemandSignals, LookupError> {
        if !valid_coordinates(query.latitude, query.longitude) {
            return Err(LookupError::InvalidCoordinates {
                latitude: query.latitude,
                longitude: query.longitude,
            });
        }
        if !query.radius.is_finite() || query.radius <= 0.0 {
            return Err(LookupError::InvalidRadius(query.radius));
        }

        if let Some(hit) = self.cache.get(&query) {
            debug!("demand signals cache hit");
            return Ok(hit);
        }

        let event_count = self.api.event_count(&query).await?;
        let attendance = self.api.attendance(&query).await?;
        let surges = self.api.demand_surge(&query).await?;

        info!(
            events = event_count.count,
            days = attendance.len(),
            surges = surges.len(),
            "demand signals fetched"
        );

        Ok(self.cache.insert_once(
            query,
            DemandSignals {
                event_count,
                attendance,
                surges,
            },
        ))
    }

    /// Outcome for the main panel. A radius of zero covers no area, so
    /// nothing is fetched for it.
    pub async fn load(&self, query: SignalQuery) -> SignalsOutcome {
        if query.radius.abs() < f64::EPSILON {
            debug!("zero radius, demand signals skipped");
            return SignalsOutcome::NoArea;
        }
        SignalsOutcome::from_result(self.fetch(query).await)
    }
}

/// What the main panel has to show.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum SignalsOutcome {
    Loaded(DemandSignals),
    Unavailable(String),
    /// The radius is zero.
    NoArea,
    Disabled,
}

impl SignalsOutcome {
    pub fn from_result(result: Result<DemandSignals, LookupError>) -> Self {
        match result {
            Ok(signals) => Self::Loaded(signals),
            Err(LookupError::MissingCredential) => Self::Disabled,
            Err(e) => Self::Unavailable(e.user_message()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RadiusUnit;
    use crate::predicthq::testing::CountingApi;
    use chrono::NaiveDate;

    fn query(radius: f64) -> SignalQuery {
        SignalQuery {
            latitude: 48.89391,
            longitude: 2.24893,
            radius,
            unit: RadiusUnit::Km,
            date_from: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            date_to: NaiveDate::from_ymd_opt(2024, 3, 8).unwrap(),
            timezone: chrono_tz::Europe::Paris,
        }
    }

    #[tokio::test]
    async fn signals_are_memoized_per_query() {
        let api = Arc::new(CountingApi::returning(2.0));
        let service = SignalService::new(api.clone());

        let first = service.fetch(query(2.0)).await.unwrap();
        let again = service.fetch(query(2.0)).await.unwrap();
        service.fetch(query(2.5)).await.unwrap();

        assert_eq!(first, again);
        assert_eq!(first.event_count.count, 42);
        assert_eq!(first.surges.len(), 1);
        assert_eq!(api.signal_calls(), 2);
    }

    #[tokio::test]
    async fn negative_radius_is_rejected_locally() {
        let api = Arc::new(CountingApi::returning(2.0));
        let service = SignalService::new(api.clone());

        let result = service.fetch(query(-0.5)).await;

        assert!(matches!(result, Err(LookupError::InvalidRadius(_))));
        assert_eq!(api.signal_calls(), 0);
    }

    #[tokio::test]
    async fn zero_radius_means_no_area() {
        let api = Arc::new(CountingApi::returning(2.0));
        let service = SignalService::new(api.clone());

        let outcome = service.load(query(0.0)).await;

        assert_eq!(outcome, SignalsOutcome::NoArea);
        assert_eq!(api.signal_calls(), 0);
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "no_area");

        let loaded = service.load(query(0.1)).await;
        assert!(matches!(loaded, SignalsOutcome::Loaded(_)));
        assert_eq!(api.signal_calls(), 1);
    }

    #[tokio::test]
    async fn failures_become_notices() {
        let service = SignalService::new(Arc::new(CountingApi::failing()));

        let outcome = SignalsOutcome::from_result(service.fetch(query(1.0)).await);

        assert!(matches!(outcome, SignalsOutcome::Unavailable(_)));
    }
}
