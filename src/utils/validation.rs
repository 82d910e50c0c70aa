use crate::utils::error::{ClientError, Result};
use std::collections::HashMap;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(ClientError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ClientError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(ClientError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

/// Scheme and hostname only; ports and the path prefix are appended later.
pub fn validate_host_root(field_name: &str, host: &str) -> Result<()> {
    validate_url(field_name, host)?;

    let url = Url::parse(host).map_err(|e| ClientError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: host.to_string(),
        reason: format!("Invalid URL format: {}", e),
    })?;

    let reason = if url.port().is_some() || has_explicit_port(host) {
        Some("Host must not carry a port; set it per service under [services]")
    } else if !matches!(url.path(), "" | "/") {
        Some("Host must not carry a path; use client.api_prefix instead")
    } else if url.query().is_some() || url.fragment().is_some() {
        Some("Host must not carry a query or fragment")
    } else if !url.username().is_empty() || url.password().is_some() {
        Some("Host must not carry credentials")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(ClientError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: host.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

/// `Url` drops default ports (`http://h:80`), so look at the raw authority too.
fn has_explicit_port(raw: &str) -> bool {
    let rest = raw.split_once("://").map_or(raw, |(_, rest)| rest);
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let host_port = authority.rsplit('@').next().unwrap_or_default();
    let after_ipv6 = host_port.rsplit(']').next().unwrap_or_default();
    after_ipv6.contains(':')
}

pub fn validate_path_prefix(field_name: &str, prefix: &str) -> Result<()> {
    if !prefix.starts_with('/') {
        return Err(ClientError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: prefix.to_string(),
            reason: "Path prefix must start with '/'".to_string(),
        });
    }

    if prefix.contains(char::is_whitespace) {
        return Err(ClientError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: prefix.to_string(),
            reason: "Path prefix cannot contain whitespace".to_string(),
        });
    }

    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(ClientError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// Rejects two named entries that share the same value.
pub fn validate_distinct<T: std::hash::Hash + Eq + std::fmt::Display + Copy>(
    field_name: &str,
    entries: &[(&str, T)],
) -> Result<()> {
    let mut seen: HashMap<T, &str> = HashMap::new();

    for (name, value) in entries {
        if let Some(other) = seen.insert(*value, *name) {
            return Err(ClientError::InvalidConfigValueError {
                field: format!("{}.{}", field_name, name),
                value: value.to_string(),
                reason: format!("Already used by {}.{}", field_name, other),
            });
        }
    }

    Ok(())
}
