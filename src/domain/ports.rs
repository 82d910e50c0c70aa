use crate::domain::diagnostic::Observation;
use crate::domain::model::{ApiResponse, Service};
use crate::utils::error::{ClientError, Result};
use std::time::Duration;

/// Source of the host, ports and options the registry is built from.
pub trait EndpointProvider: Send + Sync {
    fn host(&self) -> &str;
    fn api_prefix(&self) -> &str;
    fn port(&self, service: Service) -> u16;
    fn timeout(&self) -> Option<Duration>;
}

/// One step of the response pipeline shared by every service client.
///
/// Implementations see each outcome exactly once. A step that only observes
/// must hand back what it received.
pub trait ResponseInterceptor: Send + Sync {
    fn on_success(&self, response: ApiResponse) -> ApiResponse {
        response
    }

    fn on_failure(&self, error: ClientError) -> ClientError;

    fn intercept(&self, outcome: Result<ApiResponse>) -> Result<ApiResponse> {
        match outcome {
            Ok(response) => Ok(self.on_success(response)),
            Err(error) => Err(self.on_failure(error)),
        }
    }
}

/// Where failure observations end up.
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, observation: &Observation);
}
