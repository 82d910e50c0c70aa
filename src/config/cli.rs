use crate::config::RegistryConfig;
use crate::domain::model::Service;
use crate::utils::error::{ClientError, Result};
use clap::{Parser, Subcommand, ValueEnum};
use reqwest::Method;

#[derive(Debug, Clone, Parser)]
#[command(name = "switch-client")]
#[command(about = "Operator console for the switch backend services")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Override the host root, e.g. http://10.0.0.7
    #[arg(long)]
    pub host: Option<String>,

    /// Per-request timeout in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the base URL of every service
    Endpoints,

    /// Issue a single request to one service
    Call {
        #[arg(value_enum)]
        service: Service,

        /// Path relative to the service base URL, e.g. /instituciones
        path: String,

        #[arg(short = 'X', long, default_value = "GET")]
        method: String,

        /// JSON request body
        #[arg(short, long)]
        data: Option<String>,
    },

    /// Check which services answer
    Probe {
        #[arg(long, default_value = "")]
        path: String,
    },
}

impl CliConfig {
    /// 載入配置檔並套用命令列覆蓋設定
    pub fn registry_config(&self) -> Result<RegistryConfig> {
        let mut config = match &self.config {
            Some(path) => RegistryConfig::from_file(path)?,
            None => RegistryConfig::default(),
        };

        if let Some(host) = &self.host {
            config = config.with_host(host.clone());
        }

        if let Some(timeout_ms) = self.timeout_ms {
            config = config.with_timeout_ms(timeout_ms);
        }

        Ok(config)
    }
}

/// `-X` value to an HTTP method, case-insensitively.
pub fn parse_method(raw: &str) -> Result<Method> {
    Method::from_bytes(raw.trim().to_ascii_uppercase().as_bytes()).map_err(|e| {
        ClientError::InvalidConfigValueError {
            field: "method".to_string(),
            value: raw.to_string(),
            reason: e.to_string(),
        }
    })
}

/// `--data` value to a JSON body.
pub fn parse_body(raw: Option<&str>) -> Result<Option<serde_json::Value>> {
    raw.map(serde_json::from_str::<serde_json::Value>)
        .transpose()
        .map_err(ClientError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_call_with_alias() {
        let cli = CliConfig::try_parse_from([
            "switch-client",
            "call",
            "directorio",
            "/instituciones",
        ])
        .unwrap();

        match cli.command {
            Command::Call {
                service,
                path,
                method,
                data,
            } => {
                assert_eq!(service, Service::Directory);
                assert_eq!(path, "/instituciones");
                assert_eq!(method, "GET");
                assert!(data.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_overrides_apply_on_defaults() {
        let cli = CliConfig::try_parse_from([
            "switch-client",
            "--host",
            "http://10.0.0.7",
            "--timeout-ms",
            "1500",
            "endpoints",
        ])
        .unwrap();

        let config = cli.registry_config().unwrap();
        assert_eq!(config.client.host, "http://10.0.0.7");
        assert_eq!(config.client.timeout_ms, Some(1500));
        assert_eq!(
            config.base_url(Service::Compensation),
            "http://10.0.0.7:8084/api/v1"
        );
    }

    #[test]
    fn test_parse_method() {
        assert_eq!(parse_method("post").unwrap(), Method::POST);
        assert_eq!(parse_method("DELETE").unwrap(), Method::DELETE);

        let err = parse_method("GE T").unwrap_err();
        assert!(matches!(
            err,
            ClientError::InvalidConfigValueError { ref field, .. } if field == "method"
        ));
        assert!(!err.is_call_failure());
    }

    #[test]
    fn test_parse_body() {
        assert_eq!(parse_body(None).unwrap(), None);
        assert_eq!(
            parse_body(Some(r#"{"bic":"NEXUSEC1"}"#)).unwrap(),
            Some(serde_json::json!({"bic": "NEXUSEC1"}))
        );

        let err = parse_body(Some("{bic:")).unwrap_err();
        assert!(matches!(err, ClientError::SerializationError(_)));
    }

    #[test]
    fn test_unknown_service_rejected() {
        assert!(CliConfig::try_parse_from(["switch-client", "call", "ledger", "/x"]).is_err());
    }
}
