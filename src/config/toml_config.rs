use crate::core::EndpointProvider;
use crate::domain::model::Service;
use crate::utils::error::{ClientError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

pub const DEFAULT_HOST: &str = "http://localhost";
pub const DEFAULT_API_PREFIX: &str = "/api/v1";
const MAX_TIMEOUT_MS: u64 = 600_000;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub client: ClientSettings,
    pub services: ServicePorts,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    pub host: String,
    pub api_prefix: String,
    pub timeout_ms: Option<u64>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            timeout_ms: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServicePorts {
    #[serde(alias = "nucleo")]
    pub nucleus: u16,
    #[serde(alias = "directorio")]
    pub directory: u16,
    #[serde(alias = "contabilidad")]
    pub accounting: u16,
    #[serde(alias = "compensacion")]
    pub compensation: u16,
}

impl Default for ServicePorts {
    fn default() -> Self {
        Self {
            nucleus: Service::Nucleus.default_port(),
            directory: Service::Directory.default_port(),
            accounting: Service::Accounting.default_port(),
            compensation: Service::Compensation.default_port(),
        }
    }
}

impl ServicePorts {
    pub fn get(&self, service: Service) -> u16 {
        match service {
            Service::Nucleus => self.nucleus,
            Service::Directory => self.directory,
            Service::Accounting => self.accounting,
            Service::Compensation => self.compensation,
        }
    }

    pub fn set(&mut self, service: Service, port: u16) {
        match service {
            Service::Nucleus => self.nucleus = port,
            Service::Directory => self.directory = port,
            Service::Accounting => self.accounting = port,
            Service::Compensation => self.compensation = port,
        }
    }
}

impl RegistryConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ClientError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ClientError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SWITCH_HOST})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        static ENV_VAR: OnceLock<regex::Regex> = OnceLock::new();
        let re = ENV_VAR
            .get_or_init(|| regex::Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"));

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_host_root("client.host", &self.client.host)?;
        validation::validate_path_prefix("client.api_prefix", &self.client.api_prefix)?;

        if let Some(timeout_ms) = self.client.timeout_ms {
            validation::validate_range("client.timeout_ms", timeout_ms, 1, MAX_TIMEOUT_MS)?;
        }

        let ports: Vec<(&str, u16)> = Service::ALL
            .iter()
            .map(|service| (service.name(), self.services.get(*service)))
            .collect();

        for (name, port) in &ports {
            validation::validate_range(&format!("services.{}", name), *port, 1, u16::MAX)?;
        }
        validation::validate_distinct("services", &ports)?;

        Ok(())
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.client.host = host.into();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.client.timeout_ms = Some(timeout_ms);
        self
    }

    pub fn with_port(mut self, service: Service, port: u16) -> Self {
        self.services.set(service, port);
        self
    }

    /// 取得各服務的基礎 URL
    pub fn base_url(&self, service: Service) -> String {
        crate::core::ServiceEndpoint::new(
            service,
            &self.client.host,
            self.services.get(service),
            &self.client.api_prefix,
        )
        .base_url()
        .to_string()
    }
}

impl EndpointProvider for RegistryConfig {
    fn host(&self) -> &str {
        &self.client.host
    }

    fn api_prefix(&self) -> &str {
        &self.client.api_prefix
    }

    fn port(&self, service: Service) -> u16 {
        self.services.get(service)
    }

    fn timeout(&self) -> Option<Duration> {
        self.client.timeout_ms.map(Duration::from_millis)
    }
}

impl Validate for RegistryConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_document_gives_defaults() {
        let config = RegistryConfig::from_toml_str("").unwrap();

        assert_eq!(config, RegistryConfig::default());
        assert_eq!(config.host(), "http://localhost");
        assert_eq!(config.api_prefix(), "/api/v1");
        assert!(config.timeout().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_base_urls() {
        let config = RegistryConfig::default();

        assert_eq!(config.base_url(Service::Nucleus), "http://localhost:8082/api/v1");
        assert_eq!(config.base_url(Service::Directory), "http://localhost:8081/api/v1");
        assert_eq!(config.base_url(Service::Accounting), "http://localhost:8083/api/v1");
        assert_eq!(
            config.base_url(Service::Compensation),
            "http://localhost:8084/api/v1"
        );
    }

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[client]
host = "https://switch.internal"
api_prefix = "/api/v2"
timeout_ms = 2500

[services]
nucleo = 9082
directory = 9081
accounting = 9083
compensation = 9084
"#;

        let config = RegistryConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.services.nucleus, 9082);
        assert_eq!(config.timeout(), Some(Duration::from_millis(2500)));
        assert_eq!(
            config.base_url(Service::Nucleus),
            "https://switch.internal:9082/api/v2"
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SWITCH_CLIENT_TEST_HOST", "http://10.0.0.7");

        let toml_content = r#"
[client]
host = "${SWITCH_CLIENT_TEST_HOST}"
"#;

        let config = RegistryConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.client.host, "http://10.0.0.7");

        std::env::remove_var("SWITCH_CLIENT_TEST_HOST");
    }

    #[test]
    fn test_unset_env_var_is_kept() {
        let toml_content = r#"
[client]
host = "${SWITCH_CLIENT_SURELY_UNSET}"
"#;

        let config = RegistryConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.client.host, "${SWITCH_CLIENT_SURELY_UNSET}");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation() {
        let config = RegistryConfig::default().with_host("localhost");
        assert!(config.validate().is_err());

        // host with its own port or path would yield http://localhost:9000:8081/api/v1
        let config = RegistryConfig::default().with_host("http://localhost:9000");
        assert!(config.validate().is_err());

        let config = RegistryConfig::default().with_host("http://localhost/gw");
        assert!(config.validate().is_err());

        let config = RegistryConfig::default().with_host("http://localhost/");
        assert!(config.validate().is_ok());

        let config = RegistryConfig::default().with_port(Service::Accounting, 8081);
        assert!(config.validate().is_err());

        let config = RegistryConfig::default().with_port(Service::Nucleus, 0);
        assert!(config.validate().is_err());

        let config = RegistryConfig::default().with_timeout_ms(0);
        assert!(config.validate().is_err());

        let mut config = RegistryConfig::default();
        config.client.api_prefix = "api/v1".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = RegistryConfig::from_toml_str("[services]\nnucleus = \"x\"").unwrap_err();
        assert!(matches!(err, ClientError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[services]
directory = 18081
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = RegistryConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.services.directory, 18081);
        assert_eq!(config.services.nucleus, 8082);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = RegistryConfig::from_file("/nonexistent/switch-client.toml").unwrap_err();
        assert!(matches!(err, ClientError::IoError(_)));
    }
}
