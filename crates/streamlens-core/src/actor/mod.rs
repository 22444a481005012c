//! Actor implementations

pub mod host;
pub mod registry;

pub use host::{HostActor, HostActorArgs};
pub use registry::{CatalogTransportFactory, RegistryActor, RegistryActorArgs};
