use thiserror::Error;

use crate::config::API_TOKEN_VAR;

/// Failures of calls to the events-intelligence API.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("no PredictHQ API token configured")]
    MissingCredential,

    #[error("invalid coordinates: lat={latitude}, lon={longitude}")]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    #[error("invalid radius: {0}")]
    InvalidRadius(f64),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("PredictHQ returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl LookupError {
    /// Short message suitable for an inline notice.
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingCredential => format!("Set {API_TOKEN_VAR} to enable live data."),
            Self::InvalidCoordinates { .. } | Self::InvalidRadius(_) => self.to_string(),
            Self::Http(_) => "Unable to reach PredictHQ. Check your connection.".to_string(),
            Self::Status { status: 401 | 403, .. } => {
                "PredictHQ rejected the API token.".to_string()
            }
            Self::Status { status, .. } => format!("PredictHQ request failed (HTTP {status})."),
            Self::Decode(_) => "PredictHQ sent a response we could not read.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_credential_names_the_variable() {
        assert!(LookupError::MissingCredential
            .user_message()
            .contains(API_TOKEN_VAR));
    }

    #[test]
    fn auth_failures_mention_the_token() {
        let err = LookupError::Status {
            status: 401,
            body: "{}".to_string(),
        };
        assert!(err.user_message().contains("token"));
    }

    #[test]
    fn other_statuses_report_the_code() {
        let err = LookupError::Status {
            status: 503,
            body: String::new(),
        };
        assert!(err.user_message().contains("503"));
        assert!(err.to_string().contains("HTTP 503"));
    }

    #[test]
    fn decode_errors_convert() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: LookupError = json_err.into();
        assert!(matches!(err, LookupError::Decode(_)));
    }
}
