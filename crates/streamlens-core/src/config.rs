//! Configuration types for streaming hosts

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Conventional HTTP port streaming hosts serve their catalog on
pub const DEFAULT_CATALOG_PORT: u16 = 47989;

/// Configuration for a single streaming host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostConfig {
    /// Unique host name identifier
    pub name: String,
    /// Address the catalog endpoint is reachable on
    pub addr: String,
    /// Catalog port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Human-readable name for display (falls back to `name`)
    pub display_name: Option<String>,
    /// Tags for filtering and grouping
    #[serde(default)]
    pub tags: Vec<String>,
    /// Host-specific fetch policy
    #[serde(default)]
    pub policy: CatalogPolicy,
}

fn default_port() -> u16 {
    DEFAULT_CATALOG_PORT
}

/// Policy settings for catalog fetches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogPolicy {
    /// Timeout applied to one catalog request, in seconds
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

fn default_fetch_timeout_secs() -> u64 {
    10
}

impl Default for CatalogPolicy {
    fn default() -> Self {
        Self {
            fetch_timeout_secs: default_fetch_timeout_secs(),
        }
    }
}

impl CatalogPolicy {
    /// Fetch timeout as a `Duration`
    #[must_use]
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}
