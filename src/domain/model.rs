use crate::utils::error::{ClientError, Result};
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Backend microservices of the switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Service {
    #[serde(alias = "nucleo")]
    #[cfg_attr(feature = "cli", value(alias = "nucleo"))]
    Nucleus,
    #[serde(alias = "directorio")]
    #[cfg_attr(feature = "cli", value(alias = "directorio"))]
    Directory,
    #[serde(alias = "contabilidad")]
    #[cfg_attr(feature = "cli", value(alias = "contabilidad"))]
    Accounting,
    #[serde(alias = "compensacion")]
    #[cfg_attr(feature = "cli", value(alias = "compensacion"))]
    Compensation,
}

impl Service {
    pub const ALL: [Service; 4] = [
        Service::Nucleus,
        Service::Directory,
        Service::Accounting,
        Service::Compensation,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Service::Nucleus => "nucleus",
            Service::Directory => "directory",
            Service::Accounting => "accounting",
            Service::Compensation => "compensation",
        }
    }

    pub fn default_port(&self) -> u16 {
        match self {
            Service::Nucleus => 8082,
            Service::Directory => 8081,
            Service::Accounting => 8083,
            Service::Compensation => 8084,
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Service {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nucleus" | "nucleo" | "core" => Ok(Service::Nucleus),
            "directory" | "directorio" => Ok(Service::Directory),
            "accounting" | "contabilidad" => Ok(Service::Accounting),
            "compensation" | "compensacion" => Ok(Service::Compensation),
            other => Err(ClientError::InvalidConfigValueError {
                field: "service".to_string(),
                value: other.to_string(),
                reason: "Unknown service".to_string(),
            }),
        }
    }
}

/// A named backend's reachable base address. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEndpoint {
    service: Service,
    base_url: String,
}

impl ServiceEndpoint {
    /// `host` is the scheme + hostname root, e.g. `http://localhost`.
    pub fn new(service: Service, host: &str, port: u16, api_prefix: &str) -> Self {
        let host = host.trim_end_matches('/');
        let prefix = api_prefix.trim_end_matches('/');
        Self {
            service,
            base_url: format!("{}:{}{}", host, port, prefix),
        }
    }

    pub fn service(&self) -> Service {
        self.service
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Joins a request path onto the base URL.
    ///
    /// Absolute `http(s)://` paths are returned untouched and an empty path
    /// addresses the base itself.
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        let relative = path.trim_start_matches('/');
        if relative.is_empty() {
            return self.base_url.clone();
        }

        format!("{}/{}", self.base_url.trim_end_matches('/'), relative)
    }
}

/// A successful (2xx) response as handed back to callers.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn new(status: StatusCode, headers: HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}
