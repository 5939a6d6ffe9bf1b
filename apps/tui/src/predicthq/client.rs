//! HTTP client for the PredictHQ REST API

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use tracing::{debug, instrument, warn};

use super::types::{
    DailyAttendance, DemandSurgeResponse, EventCount, FeaturesResponse, RadiusQuery,
    SignalQuery, SuggestedRadius, SurgeDate,
};
use super::EventsApi;
use crate::domain::ATTENDED_CATEGORIES;
use crate::error::LookupError;

pub const DEFAULT_BASE_URL: &str = "https://api.predicthq.com";

pub struct PredictHqClient {
    http: Client,
    base_url: String,
    token: String,
}

impl std::fmt::Debug for PredictHqClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredictHqClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl PredictHqClient {
    /// Fails with `MissingCredential` when the token is absent or blank.
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Result<Self, LookupError> {
        let token = token
            .filter(|token| !token.trim().is_empty())
            .ok_or(LookupError::MissingCredential)?;

        let http = Client::builder()
            .user_agent(concat!("hotel-demand-tui/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            token,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, LookupError> {
        let response = request
            .bearer_auth(&self.token)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(status = %status, "PredictHQ request failed");
            return Err(LookupError::Status {
                status: status.as_u16(),
                body,
            });
        }

        debug!(status = %status, bytes = body.len(), "PredictHQ response received");
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl EventsApi for PredictHqClient {
    #[instrument(level = "info", skip(self))]
    async fn suggested_radius(&self, query: &RadiusQuery) -> Result<SuggestedRadius, LookupError> {
        let request = self
            .http
            .get(self.endpoint("/v1/suggested-radius/"))
            .query(&radius_params(query));
        self.send(request).await
    }

    #[instrument(level = "info", skip(self))]
    async fn event_count(&self, query: &SignalQuery) -> Result<EventCount, LookupError> {
        let request = self
            .http
            .get(self.endpoint("/v1/events/count/"))
            .query(&count_params(query));
        self.send(request).await
    }

    #[instrument(level = "info", skip(self))]
    async fn attendance(&self, query: &SignalQuery) -> Result<Vec<DailyAttendance>, LookupError> {
        let request = self
            .http
            .post(self.endpoint("/v1/features/"))
            .json(&features_body(query));
        let response: FeaturesResponse = self.send(request).await?;
        Ok(response
            .results
            .into_iter()
            .map(DailyAttendance::from)
            .collect())
    }

    #[instrument(level = "info", skip(self))]
    async fn demand_surge(&self, query: &SignalQuery) -> Result<Vec<SurgeDate>, LookupError> {
        let request = self
            .http
            .get(self.endpoint("/v1/demand-surge/"))
            .query(&surge_params(query));
        let response: DemandSurgeResponse = self.send(request).await?;
        Ok(response.surge_dates)
    }
}

fn radius_params(query: &RadiusQuery) -> Vec<(&'static str, String)> {
    vec![
        ("location.origin", query.origin()),
        ("radius_unit", query.unit.as_str().to_string()),
        ("industry", query.industry.as_str().to_string()),
    ]
}

fn count_params(query: &SignalQuery) -> Vec<(&'static str, String)> {
    vec![
        ("within", query.within()),
        ("active.gte", query.date_from.to_string()),
        ("active.lte", query.date_to.to_string()),
        ("active.tz", query.timezone.name().to_string()),
        ("category", ATTENDED_CATEGORIES.join(",")),
        ("state", "active,predicted".to_string()),
    ]
}

fn surge_params(query: &SignalQuery) -> Vec<(&'static str, String)> {
    vec![
        ("location.origin", query.origin()),
        ("location.radius", query.radius_with_unit()),
        ("date_from", query.date_from.to_string()),
        ("date_to", query.date_to.to_string()),
    ]
}

fn features_body(query: &SignalQuery) -> Value {
    let mut body = Map::new();
    body.insert(
        "active".to_string(),
        json!({
            "gte": query.date_from.to_string(),
            "lte": query.date_to.to_string(),
        }),
    );
    body.insert(
        "location".to_string(),
        json!({
            "geo": {
                "lat": query.latitude,
                "lon": query.longitude,
                "radius": query.radius_with_unit(),
            }
        }),
    );
    for category in ATTENDED_CATEGORIES {
        body.insert(
            format!("phq_attendance_{}", category.replace('-', "_")),
            json!({ "stats": { "aggregations": ["sum"] } }),
        );
    }
    Value::Object(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Industry, RadiusUnit};
    use chrono::NaiveDate;

    fn signal_query() -> SignalQuery {
        SignalQuery {
            latitude: 53.43041,
            longitude: -2.95626,
            radius: 3.2,
            unit: RadiusUnit::Km,
            date_from: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            date_to: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            timezone: chrono_tz::Europe::London,
        }
    }

    #[test]
    fn blank_token_is_missing_credential() {
        let result = PredictHqClient::new(DEFAULT_BASE_URL, Some("  ".to_string()));
        assert!(matches!(result, Err(LookupError::MissingCredential)));

        let result = PredictHqClient::new(DEFAULT_BASE_URL, None);
        assert!(matches!(result, Err(LookupError::MissingCredential)));
    }

    #[test]
    fn endpoint_joins_without_double_slash() {
        let client =
            PredictHqClient::new("https://example.test/", Some("token".to_string())).unwrap();
        assert_eq!(
            client.endpoint("/v1/suggested-radius/"),
            "https://example.test/v1/suggested-radius/"
        );
    }

    #[test]
    fn debug_output_hides_token() {
        let client = PredictHqClient::new(DEFAULT_BASE_URL, Some("s3cret".to_string())).unwrap();
        assert!(!format!("{client:?}").contains("s3cret"));
    }

    #[test]
    fn radius_query_parameters() {
        let query = RadiusQuery::new(37.78684, -122.40308, RadiusUnit::Mi);
        let params = radius_params(&query);
        assert_eq!(
            params,
            vec![
                ("location.origin", "37.78684,-122.40308".to_string()),
                ("radius_unit", "mi".to_string()),
                ("industry", "accommodation".to_string()),
            ]
        );

        let tourism = radius_params(&query.with_industry(Industry::Tourism));
        assert_eq!(tourism[2].1, "tourism");
    }

    #[test]
    fn count_parameters_use_local_dates() {
        let params = count_params(&signal_query());
        assert!(params.contains(&("within", "3.2km@53.43041,-2.95626".to_string())));
        assert!(params.contains(&("active.gte", "2024-01-01".to_string())));
        assert!(params.contains(&("active.lte", "2024-01-31".to_string())));
        assert!(params.contains(&("active.tz", "Europe/London".to_string())));
    }

    #[test]
    fn features_body_requests_every_attended_category() {
        let body = features_body(&signal_query());
        assert_eq!(body["location"]["geo"]["radius"], "3.2km");
        assert_eq!(body["active"]["gte"], "2024-01-01");
        assert_eq!(
            body["phq_attendance_concerts"]["stats"]["aggregations"][0],
            "sum"
        );
        assert_eq!(
            body["phq_attendance_performing_arts"]["stats"]["aggregations"],
            json!(["sum"])
        );
        let feature_count = body
            .as_object()
            .map(|o| o.keys().filter(|k| k.starts_with("phq_attendance_")).count());
        assert_eq!(feature_count, Some(ATTENDED_CATEGORIES.len()));
    }

    #[test]
    fn surge_parameters() {
        let params = surge_params(&signal_query());
        assert_eq!(params[1], ("location.radius", "3.2km".to_string()));
        assert_eq!(params[3], ("date_to", "2024-01-31".to_string()));
    }
}
