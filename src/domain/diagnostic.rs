use crate::utils::error::ClientError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// What gets reported about a failed call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Diagnostic {
    /// Error body returned by the remote service.
    Payload(serde_json::Value),
    /// Human-readable failure text when no body is available.
    Description(String),
}

impl Diagnostic {
    /// Prefers the remote payload, falling back to the error's message.
    pub fn from_error(error: &ClientError) -> Self {
        match error.payload() {
            Some(payload) => Diagnostic::Payload(payload.clone()),
            None => Diagnostic::Description(error.to_string()),
        }
    }

    pub fn payload(&self) -> Option<&serde_json::Value> {
        match self {
            Diagnostic::Payload(value) => Some(value),
            Diagnostic::Description(_) => None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Payload(value) => write!(f, "{}", value),
            Diagnostic::Description(text) => f.write_str(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    pub url: Option<String>,
    pub status: Option<u16>,
    pub detail: Diagnostic,
    pub observed_at: DateTime<Utc>,
}

impl Observation {
    pub fn from_error(error: &ClientError) -> Self {
        Self {
            url: error.request_url(),
            status: error.status().map(|s| s.as_u16()),
            detail: Diagnostic::from_error(error),
            observed_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use serde_json::json;

    #[test]
    fn test_payload_wins_over_description() {
        let error = ClientError::Remote {
            url: "http://localhost:8081/api/v1/banks".to_string(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
            payload: Some(json!({"error": "unavailable"})),
        };

        let observation = Observation::from_error(&error);
        assert_eq!(observation.detail, Diagnostic::Payload(json!({"error": "unavailable"})));
        assert_eq!(observation.status, Some(500));
        assert_eq!(
            observation.url.as_deref(),
            Some("http://localhost:8081/api/v1/banks")
        );
    }

    #[test]
    fn test_description_without_payload() {
        let error = ClientError::Remote {
            url: "http://localhost:8084/api/v1/ciclos".to_string(),
            status: StatusCode::BAD_GATEWAY,
            payload: None,
        };

        let detail = Diagnostic::from_error(&error);
        assert_eq!(
            detail,
            Diagnostic::Description("Request failed with status code 502".to_string())
        );
        assert!(detail.payload().is_none());
    }

    #[test]
    fn test_display_is_compact_json() {
        let detail = Diagnostic::Payload(json!({"error": "unavailable"}));
        assert_eq!(detail.to_string(), r#"{"error":"unavailable"}"#);
    }
}
