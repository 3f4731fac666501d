//! Options value handed to every autoloaded route module.

use chrono::{DateTime, Utc};

use crate::config::ServiceConfig;
use crate::store::ItemStore;

/// Service identity and shared state, forwarded unchanged to route modules.
#[derive(Debug, Clone)]
pub struct ServiceOptions {
    pub service_name: String,
    pub version: &'static str,
    pub started_at: DateTime<Utc>,
    /// Prefix for every autoloaded route (`ROUTE_PREFIX`).
    pub route_prefix: Option<String>,
    pub items: ItemStore,
}

impl ServiceOptions {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            version: env!("CARGO_PKG_VERSION"),
            started_at: Utc::now(),
            route_prefix: None,
            items: ItemStore::new(),
        }
    }

    pub fn with_route_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.route_prefix = Some(prefix.into());
        self
    }

    pub fn from_config(config: &ServiceConfig) -> Self {
        Self {
            route_prefix: config.route_prefix.clone(),
            ..Self::new(config.service_name.clone())
        }
    }
}
