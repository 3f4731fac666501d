//! Service configuration, read from the environment.

use std::net::SocketAddr;

use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_SERVICE_NAME: &str = "service-one";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid BIND_ADDR {value:?}: {reason}")]
    InvalidBindAddr { value: String, reason: String },

    #[error("invalid ROUTE_PREFIX {0:?}: must start with '/'")]
    InvalidRoutePrefix(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub bind_addr: SocketAddr,
    pub service_name: String,
    /// Prefix prepended to every autoloaded route.
    pub route_prefix: Option<String>,
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup (the environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidBindAddr {
                value: raw_addr.clone(),
                reason: e.to_string(),
            })?;

        let service_name = lookup("SERVICE_NAME")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| {
                tracing::warn!("SERVICE_NAME not set; using {DEFAULT_SERVICE_NAME}");
                DEFAULT_SERVICE_NAME.to_string()
            });

        let route_prefix = match lookup("ROUTE_PREFIX").filter(|s| !s.is_empty()) {
            Some(p) if !p.starts_with('/') => return Err(ConfigError::InvalidRoutePrefix(p)),
            other => other,
        };

        Ok(Self {
            bind_addr,
            service_name,
            route_prefix,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = ServiceConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR.parse().unwrap());
        assert_eq!(config.service_name, DEFAULT_SERVICE_NAME);
        assert_eq!(config.route_prefix, None);
    }

    #[test]
    fn reads_all_keys() {
        let config = ServiceConfig::from_lookup(lookup(&[
            ("BIND_ADDR", "127.0.0.1:9000"),
            ("SERVICE_NAME", "orders"),
            ("ROUTE_PREFIX", "/api"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.service_name, "orders");
        assert_eq!(config.route_prefix.as_deref(), Some("/api"));
    }

    #[test]
    fn rejects_bad_values() {
        let err = ServiceConfig::from_lookup(lookup(&[("BIND_ADDR", "not-an-addr")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBindAddr { .. }));

        let err = ServiceConfig::from_lookup(lookup(&[("ROUTE_PREFIX", "api")])).unwrap_err();
        assert_eq!(err, ConfigError::InvalidRoutePrefix("api".into()));
    }
}
