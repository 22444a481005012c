//! Response types for the API

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// One launchable application, as served over the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AppEntryDto {
    /// Application identifier, unique per host
    pub id: String,
    /// Display title
    pub title: String,
    /// Whether the application is currently running on the host
    pub running: bool,
}

/// One immutable catalog snapshot, as served over the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SnapshotResponse {
    /// Host the snapshot belongs to
    pub host: String,
    /// When the snapshot was fetched (RFC 3339)
    pub fetched_at: String,
    /// Applications in canonical order (title, case-insensitive, id tiebreak)
    pub apps: Vec<AppEntryDto>,
}

/// Cached-catalog lookup result; `snapshot` is null when nothing is cached
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CachedCatalogResponse {
    pub host: String,
    pub snapshot: Option<SnapshotResponse>,
}

/// Status of a single host
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HostStatusResponse {
    /// Host name
    pub name: String,
    /// Display name, falling back to the host name
    pub display_name: String,
    /// Current catalog state (unfetched, fetching, ready)
    pub state: String,
    /// Number of apps in the cached snapshot, if any
    pub app_count: Option<usize>,
    /// When the cached snapshot was fetched (RFC 3339)
    pub fetched_at: Option<String>,
    /// Last fetch error, if the most recent fetch failed
    pub error: Option<String>,
    /// Consecutive failed fetches since the last success
    pub consecutive_failures: u32,
    /// Tags assigned to the host
    pub tags: Vec<String>,
}

/// Host list response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HostListResponse {
    pub hosts: Vec<HostStatusResponse>,
}

/// Result of a cancel request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CancelResponse {
    pub host: String,
    /// Whether an in-flight fetch was actually cancelled
    pub cancelled: bool,
}
