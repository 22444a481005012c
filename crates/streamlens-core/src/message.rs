//! Message types for actor communication
//!
//! Message handlers are implemented in their respective actor modules.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use kameo_macros::Reply;
use tokio::sync::oneshot;

use streamlens_catalog::{CatalogError, InventorySnapshot};

use crate::config::HostConfig;
use crate::state::{CatalogState, FetchFailure};

/// Final result of one catalog fetch, fanned out to every joined caller
pub type FetchOutcome = Result<Arc<InventorySnapshot>, CatalogError>;

// ============================================================================
// HostActor Messages
// ============================================================================

/// Start a catalog fetch, or join the in-flight one
#[derive(Debug)]
pub struct FetchCatalog;

/// Caller-side handle to a pending fetch.
///
/// The host actor replies with this immediately; awaiting the outcome happens
/// outside the actor so the mailbox is never blocked on the network.
#[derive(Debug, Reply)]
pub struct FetchHandle {
    rx: oneshot::Receiver<FetchOutcome>,
}

impl FetchHandle {
    pub(crate) fn new(rx: oneshot::Receiver<FetchOutcome>) -> Self {
        Self { rx }
    }

    /// Wait for the fetch to settle.
    ///
    /// A dropped sender (actor torn down mid-fetch) reads as `Cancelled`.
    pub async fn outcome(self) -> FetchOutcome {
        match self.rx.await {
            Ok(outcome) => outcome,
            Err(_) => Err(CatalogError::Cancelled),
        }
    }
}

/// Get the cached snapshot without touching the network
#[derive(Debug)]
pub struct GetCached;

/// Cached snapshot lookup result
#[derive(Debug, Clone, Reply)]
pub struct CachedCatalog {
    /// Last successful snapshot, if any
    pub snapshot: Option<Arc<InventorySnapshot>>,
}

/// Drop the cached snapshot
#[derive(Debug)]
pub struct Invalidate;

/// Abort the in-flight fetch, if any
#[derive(Debug)]
pub struct CancelFetch;

/// Get current catalog state
#[derive(Debug)]
pub struct GetState;

/// Get full host status
#[derive(Debug)]
pub struct GetStatus;

/// Host status response
#[derive(Debug, Clone, Reply)]
pub struct HostCatalogStatus {
    /// Host name
    pub name: String,
    /// Display name, falling back to the host name
    pub display_name: String,
    /// Current state
    pub state: CatalogState,
    /// Number of apps in the cached snapshot, if any
    pub app_count: Option<usize>,
    /// When the cached snapshot was fetched
    pub fetched_at: Option<DateTime<Utc>>,
    /// Details of the most recent failed fetch
    pub last_error: Option<FetchFailure>,
    /// Tags assigned to the host
    pub tags: Vec<String>,
}

/// Internal: a spawned fetch task reporting its result back to the actor
#[derive(Debug)]
pub(crate) struct FetchSettled {
    pub result: Result<InventorySnapshot, CatalogError>,
}

// ============================================================================
// RegistryActor Messages
// ============================================================================

/// Register a new host with the registry
#[derive(Debug)]
pub struct RegisterHost {
    /// Host configuration
    pub config: HostConfig,
}

/// Unregister a host from the registry
#[derive(Debug)]
pub struct UnregisterHost {
    /// Host name to remove
    pub host: String,
}

/// Fetch (or join the in-flight fetch of) a specific host's catalog
#[derive(Debug)]
pub struct FetchHostCatalog {
    /// Host name to fetch
    pub host: String,
}

/// Get the cached snapshot for a specific host
#[derive(Debug)]
pub struct GetCachedCatalog {
    /// Host name to look up
    pub host: String,
}

/// Invalidate the cached snapshot for a specific host
#[derive(Debug)]
pub struct InvalidateCatalog {
    /// Host name to invalidate
    pub host: String,
}

/// Cancel the in-flight fetch for a specific host
#[derive(Debug)]
pub struct CancelHostFetch {
    /// Host name to cancel
    pub host: String,
}

/// Get status of a specific host
#[derive(Debug)]
pub struct GetHostStatus {
    /// Host name to query
    pub host: String,
}

/// List all registered hosts
#[derive(Debug)]
pub struct ListHosts;
