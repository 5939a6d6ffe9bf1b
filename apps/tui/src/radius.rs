//! Suggested-radius lookup with memoization.

use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::cache::{MemoCache, MemoryCache};
use crate::domain::{Industry, RadiusUnit};
use crate::error::LookupError;
use crate::predicthq::{EventsApi, RadiusQuery, SuggestedRadius};

pub type RadiusCache = MemoryCache<RadiusQuery, SuggestedRadius>;

/// Asks the API for a recommended search radius, at most once per exact
/// `(latitude, longitude, unit, industry)` for the life of the process.
/// Failures are returned to the caller and never cached.
pub struct SuggestedRadiusLookup<C = RadiusCache> {
    api: Arc<dyn EventsApi>,
    cache: C,
}

impl SuggestedRadiusLookup {
    pub fn new(api: Arc<dyn EventsApi>) -> Self {
        Self::with_cache(api, RadiusCache::new())
    }
}

impl<C: MemoCache<RadiusQuery, SuggestedRadius>> SuggestedRadiusLookup<C> {
    pub fn with_cache(api: Arc<dyn EventsApi>, cache: C) -> Self {
        Self { api, cache }
    }

    pub async fn lookup(
        &self,
        latitude: f64,
        longitude: f64,
        unit: RadiusUnit,
        industry: Industry,
    ) -> Result<SuggestedRadius, LookupError> {
        self.fetch(RadiusQuery::new(latitude, longitude, unit).with_industry(industry))
            .await
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn fetch(&self, query: RadiusQuery) -> Result<SuggestedRadius, LookupError> {
        if !query.is_valid() {
            return Err(LookupError::InvalidCoordinates {
                latitude: query.latitude,
                longitude: query.longitude,
            });
        }

        if let Some(hit) = self.cache.get(&query) {
            debug!("suggested radius cache hit");
            return Ok(hit);
        }

        debug!("suggested radius cache miss");
        let suggested = self.api.suggested_radius(&query).await?;
        Ok(self.cache.insert_once(query, suggested))
    }

    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }
}

/// What the last render pass learned about the suggested radius.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum RadiusOutcome {
    Suggested(SuggestedRadius),
    Unavailable(String),
    /// No credential, so no lookup was attempted.
    Disabled,
}

impl RadiusOutcome {
    pub fn from_result(result: Result<SuggestedRadius, LookupError>) -> Self {
        match result {
            Ok(suggested) => Self::Suggested(suggested),
            Err(LookupError::MissingCredential) => Self::Disabled,
            Err(e) => Self::Unavailable(e.user_message()),
        }
    }

    pub const fn radius(&self) -> Option<f64> {
        match self {
            Self::Suggested(suggested) => Some(suggested.radius),
            _ => None,
        }
    }

    pub fn notice(&self) -> Option<&str> {
        match self {
            Self::Unavailable(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicthq::testing::CountingApi;

    #[tokio::test]
    async fn repeated_lookup_hits_the_api_once() {
        let api = Arc::new(CountingApi::returning(1.7));
        let lookup = SuggestedRadiusLookup::new(api.clone());

        let first = lookup
            .lookup(37.78684, -122.40308, RadiusUnit::Mi, Industry::Accommodation)
            .await
            .unwrap();
        let second = lookup
            .lookup(37.78684, -122.40308, RadiusUnit::Mi, Industry::Accommodation)
            .await
            .unwrap();

        assert_eq!(api.radius_calls(), 1);
        assert_eq!(first, second);
        assert_eq!(lookup.cached_entries(), 1);
    }

    #[tokio::test]
    async fn different_unit_is_a_different_entry() {
        let api = Arc::new(CountingApi::returning(1.7));
        let lookup = SuggestedRadiusLookup::new(api.clone());

        lookup
            .lookup(37.78684, -122.40308, RadiusUnit::Mi, Industry::Accommodation)
            .await
            .unwrap();
        lookup
            .lookup(37.78684, -122.40308, RadiusUnit::Km, Industry::Accommodation)
            .await
            .unwrap();

        assert_eq!(api.radius_calls(), 2);
    }

    #[tokio::test]
    async fn failures_surface_and_are_not_cached() {
        let api = Arc::new(CountingApi::failing());
        let lookup = SuggestedRadiusLookup::new(api.clone());

        for _ in 0..2 {
            let result = lookup
                .lookup(37.78684, -122.40308, RadiusUnit::Mi, Industry::Accommodation)
                .await;
            assert!(matches!(result, Err(LookupError::Status { status: 503, .. })));
        }

        assert_eq!(api.radius_calls(), 2);
        assert_eq!(lookup.cached_entries(), 0);
    }

    #[tokio::test]
    async fn invalid_coordinates_never_reach_the_api() {
        let api = Arc::new(CountingApi::returning(1.0));
        let lookup = SuggestedRadiusLookup::new(api.clone());

        let result = lookup
            .lookup(91.0, 0.0, RadiusUnit::Km, Industry::Accommodation)
            .await;

        assert!(matches!(result, Err(LookupError::InvalidCoordinates { .. })));
        assert_eq!(api.radius_calls(), 0);
    }

    #[test]
    fn outcome_from_errors() {
        let disabled = RadiusOutcome::from_result(Err(LookupError::MissingCredential));
        assert_eq!(disabled, RadiusOutcome::Disabled);
        assert!(disabled.notice().is_none());

        let failed = RadiusOutcome::from_result(Err(LookupError::Status {
            status: 500,
            body: String::new(),
        }));
        assert!(failed.radius().is_none());
        assert!(failed.notice().is_some());
    }
}
