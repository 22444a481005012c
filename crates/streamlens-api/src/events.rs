//! WebSocket event types

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Events broadcast by the daemon whenever a host's catalog changes state.
///
/// `CatalogReady` and `CatalogFailed` are the notifications the presentation
/// layer refreshes on; `StateChanged` covers every transition, including
/// cancelled fetches (cancellation is not an error and emits nothing else).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type")]
pub enum CatalogEvent {
    HostRegistered {
        host: String,
    },
    HostRemoved {
        host: String,
        reason: String,
    },
    StateChanged {
        host: String,
        from: String,
        to: String,
    },
    CatalogReady {
        host: String,
        app_count: usize,
        fetched_at: String,
    },
    CatalogFailed {
        host: String,
        error: String,
        stale_retained: bool,
    },
}
