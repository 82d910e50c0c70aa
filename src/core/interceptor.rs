use crate::core::{ApiResponse, ClientError, DiagnosticSink, ResponseInterceptor};
use crate::domain::diagnostic::Observation;
use std::sync::Arc;

/// Default sink: one `error` event per failed call on the tracing stream.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, observation: &Observation) {
        tracing::error!(
            url = observation.url.as_deref().unwrap_or("-"),
            status = observation.status,
            "API Error: {}",
            observation.detail
        );
    }
}

/// Log-and-rethrow: successes pass untouched, failures are reported to the
/// sink and returned as they came in.
#[derive(Debug, Clone, Default)]
pub struct ErrorLogInterceptor<S: DiagnosticSink = TracingSink> {
    sink: S,
}

impl<S: DiagnosticSink> ErrorLogInterceptor<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

impl<S: DiagnosticSink> ResponseInterceptor for ErrorLogInterceptor<S> {
    fn on_failure(&self, error: ClientError) -> ClientError {
        self.sink.emit(&Observation::from_error(&error));
        error
    }
}

/// Runs several interceptors in insertion order.
#[derive(Clone, Default)]
pub struct InterceptorChain {
    stages: Vec<Arc<dyn ResponseInterceptor>>,
}

impl InterceptorChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, stage: Arc<dyn ResponseInterceptor>) -> Self {
        self.stages.push(stage);
        self
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl std::fmt::Debug for InterceptorChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterceptorChain")
            .field("stages", &self.stages.len())
            .finish()
    }
}

impl ResponseInterceptor for InterceptorChain {
    fn on_success(&self, response: ApiResponse) -> ApiResponse {
        self.stages
            .iter()
            .fold(response, |response, stage| stage.on_success(response))
    }

    fn on_failure(&self, error: ClientError) -> ClientError {
        self.stages
            .iter()
            .fold(error, |error, stage| stage.on_failure(error))
    }
}
