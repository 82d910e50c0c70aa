use crate::core::client::ServiceClient;
use crate::core::interceptor::{ErrorLogInterceptor, TracingSink};
use crate::core::{EndpointProvider, ResponseInterceptor, Result, ServiceEndpoint};
use crate::domain::model::Service;
use reqwest::Client;
use std::sync::Arc;

/// One pre-configured client per backend service.
///
/// Built once at start-up and handed to callers by reference. Building it
/// only allocates the clients; no request is issued until a caller makes one.
#[derive(Debug, Clone)]
pub struct ServiceRegistry {
    nucleus: ServiceClient,
    directory: ServiceClient,
    accounting: ServiceClient,
    compensation: ServiceClient,
}

impl ServiceRegistry {
    /// Registry with the default log-and-rethrow policy on the tracing stream.
    pub fn new<C: EndpointProvider>(config: &C) -> Result<Self> {
        Self::with_interceptor(config, Arc::new(ErrorLogInterceptor::new(TracingSink)))
    }

    pub fn with_interceptor<C: EndpointProvider>(
        config: &C,
        interceptor: Arc<dyn ResponseInterceptor>,
    ) -> Result<Self> {
        let build = |service: Service| -> Result<ServiceClient> {
            let endpoint = ServiceEndpoint::new(
                service,
                config.host(),
                config.port(service),
                config.api_prefix(),
            );

            let mut builder = Client::builder();
            if let Some(timeout) = config.timeout() {
                builder = builder.timeout(timeout);
            }

            tracing::debug!("Configured {} client at {}", service, endpoint.base_url());
            Ok(ServiceClient::new(endpoint, builder.build()?, interceptor.clone()))
        };

        Ok(Self {
            nucleus: build(Service::Nucleus)?,
            directory: build(Service::Directory)?,
            accounting: build(Service::Accounting)?,
            compensation: build(Service::Compensation)?,
        })
    }

    pub fn nucleus(&self) -> &ServiceClient {
        &self.nucleus
    }

    pub fn directory(&self) -> &ServiceClient {
        &self.directory
    }

    pub fn accounting(&self) -> &ServiceClient {
        &self.accounting
    }

    pub fn compensation(&self) -> &ServiceClient {
        &self.compensation
    }

    pub fn client(&self, service: Service) -> &ServiceClient {
        match service {
            Service::Nucleus => &self.nucleus,
            Service::Directory => &self.directory,
            Service::Accounting => &self.accounting,
            Service::Compensation => &self.compensation,
        }
    }

    /// Clients in `Service::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = &ServiceClient> {
        Service::ALL.into_iter().map(move |service| self.client(service))
    }
}
