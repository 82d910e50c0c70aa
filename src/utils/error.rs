use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    /// The service answered with a non-2xx status.
    #[error("Request failed with status code {}", .status.as_u16())]
    Remote {
        url: String,
        status: StatusCode,
        payload: Option<serde_json::Value>,
    },

    /// No usable response: connection refused, timeout, unreadable body.
    #[error("API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Remote,
    Transport,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ClientError {
    /// Structured error body returned by the remote service, if any.
    pub fn payload(&self) -> Option<&serde_json::Value> {
        match self {
            ClientError::Remote { payload, .. } => payload.as_ref(),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Remote { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status(),
            _ => None,
        }
    }

    pub fn request_url(&self) -> Option<String> {
        match self {
            ClientError::Remote { url, .. } => Some(url.clone()),
            ClientError::Transport(e) => e.url().map(|u| u.to_string()),
            _ => None,
        }
    }

    /// True for failures of an outbound call, as opposed to local setup errors.
    pub fn is_call_failure(&self) -> bool {
        matches!(
            self,
            ClientError::Remote { .. } | ClientError::Transport(_)
        )
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ClientError::Remote { .. } => ErrorCategory::Remote,
            ClientError::Transport(_) => ErrorCategory::Transport,
            ClientError::ConfigError { .. } | ClientError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            ClientError::IoError(_) | ClientError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ClientError::Remote { status, .. } if status.is_client_error() => ErrorSeverity::Medium,
            ClientError::Remote { .. } | ClientError::Transport(_) => ErrorSeverity::High,
            ClientError::ConfigError { .. } | ClientError::InvalidConfigValueError { .. } => {
                ErrorSeverity::High
            }
            ClientError::IoError(_) | ClientError::SerializationError(_) => {
                ErrorSeverity::Critical
            }
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ClientError::Remote { status, .. } if status.is_server_error() => {
                "The service reported an internal failure; check its logs".to_string()
            }
            ClientError::Remote { .. } => {
                "Check the request path and payload against the service API".to_string()
            }
            ClientError::Transport(e) if e.is_timeout() => {
                "The service did not answer in time; raise --timeout-ms or check its load"
                    .to_string()
            }
            ClientError::Transport(_) => {
                "Make sure the service is running and the host/port are correct".to_string()
            }
            ClientError::ConfigError { .. } | ClientError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or command-line overrides".to_string()
            }
            ClientError::IoError(_) => "Check that the file exists and is readable".to_string(),
            ClientError::SerializationError(_) => "Make sure the data is valid JSON".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ClientError::Remote { url, payload: Some(payload), .. } => {
                format!("{} -> {}", url, payload)
            }
            ClientError::Remote { url, .. } => format!("{} -> {}", url, self),
            _ => self.to_string(),
        }
    }
}
