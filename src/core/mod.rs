pub mod client;
pub mod interceptor;
pub mod probe;
pub mod registry;

pub use crate::domain::model::{ApiResponse, ServiceEndpoint};
pub use crate::domain::ports::{DiagnosticSink, EndpointProvider, ResponseInterceptor};
pub use crate::utils::error::{ClientError, Result};
