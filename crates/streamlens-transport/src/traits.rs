//! Catalog transport trait

use async_trait::async_trait;

use crate::error::TransportError;

/// Boundary to a single host's catalog endpoint.
///
/// One transport instance is bound to one host; it returns the raw serialized
/// catalog and leaves parsing to the caller.
#[async_trait]
pub trait CatalogTransport: Send + Sync {
    /// Fetch the raw catalog body from the host
    async fn fetch_raw(&self) -> Result<String, TransportError>;

    /// Endpoint this transport is bound to, for diagnostics
    fn endpoint(&self) -> &str;

    /// Transport kind, for diagnostics
    fn transport_type(&self) -> &'static str;
}
