pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::RegistryConfig;
pub use crate::core::{
    client::ServiceClient,
    interceptor::{ErrorLogInterceptor, InterceptorChain, TracingSink},
    probe::{probe_all, ProbeReport, Reachability},
    registry::ServiceRegistry,
};
pub use domain::diagnostic::{Diagnostic, Observation};
pub use domain::model::{ApiResponse, Service, ServiceEndpoint};
pub use domain::ports::{DiagnosticSink, EndpointProvider, ResponseInterceptor};
pub use utils::error::{ClientError, Result};
