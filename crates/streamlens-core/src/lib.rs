//! streamlens-core: Actor framework for host catalog inventory
//!
//! Implements the `RegistryActor` and `HostActor` using the kameo framework.
//! Each registered streaming host gets its own actor owning the catalog cache
//! and fetch state machine; the registry routes operations by host name.

pub mod actor;
pub mod config;
pub mod error;
pub mod message;
pub mod state;

pub use actor::host::{HostActor, HostActorArgs};
pub use actor::registry::{CatalogTransportFactory, RegistryActor, RegistryActorArgs};
pub use config::{CatalogPolicy, HostConfig, DEFAULT_CATALOG_PORT};
pub use error::CoreError;
pub use message::{
    CachedCatalog, CancelFetch, CancelHostFetch, FetchCatalog, FetchHandle, FetchHostCatalog,
    FetchOutcome, GetCached, GetCachedCatalog, GetHostStatus, GetState, GetStatus,
    HostCatalogStatus, Invalidate, InvalidateCatalog, ListHosts, RegisterHost, UnregisterHost,
};
pub use state::{CatalogState, FetchFailure};
