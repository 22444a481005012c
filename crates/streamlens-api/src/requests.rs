//! Request types for the API

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Register a streaming host at runtime
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AddHostRequest {
    /// Unique host name
    pub name: String,
    /// Address the catalog endpoint is reachable on
    pub addr: String,
    /// Catalog port (defaults to 47989)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// Human-readable name for display
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Tags for filtering and grouping
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Query parameters for listing hosts
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ListHostsQuery {
    /// Comma-separated tags; a host must carry all of them
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
}
