use crate::core::client::ServiceClient;
use crate::core::registry::ServiceRegistry;
use crate::core::ClientError;
use crate::domain::model::Service;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reachability {
    /// Some HTTP status came back, success or not.
    Online { status: u16 },
    Offline { reason: String },
}

#[derive(Debug, Clone)]
pub struct ProbeReport {
    pub service: Service,
    pub url: String,
    pub reachability: Reachability,
    pub elapsed: Duration,
}

impl ProbeReport {
    pub fn is_online(&self) -> bool {
        matches!(self.reachability, Reachability::Online { .. })
    }
}

pub async fn probe_client(client: &ServiceClient, path: &str) -> ProbeReport {
    let started = Instant::now();
    let reachability = match client.get(path).await {
        Ok(response) => Reachability::Online {
            status: response.status.as_u16(),
        },
        Err(ClientError::Remote { status, .. }) => Reachability::Online {
            status: status.as_u16(),
        },
        Err(e) => Reachability::Offline {
            reason: e.to_string(),
        },
    };

    ProbeReport {
        service: client.service(),
        url: client.url(path),
        reachability,
        elapsed: started.elapsed(),
    }
}

/// Probes every service at once; reports come back in `Service::ALL` order.
pub async fn probe_all(registry: &ServiceRegistry, path: &str) -> Vec<ProbeReport> {
    let (nucleus, directory, accounting, compensation) = tokio::join!(
        probe_client(registry.nucleus(), path),
        probe_client(registry.directory(), path),
        probe_client(registry.accounting(), path),
        probe_client(registry.compensation(), path),
    );

    vec![nucleus, directory, accounting, compensation]
}
