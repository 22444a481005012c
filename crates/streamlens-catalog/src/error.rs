//! Error types for catalog fetches

use thiserror::Error;

/// Errors a catalog fetch can surface to callers.
///
/// Consumers branch on the failure class: connectivity problems are safe to
/// retry, a corrupt catalog needs a host-side fix, and a cancelled fetch is
/// not an error at all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Host could not be contacted (connect failure, timeout, bad status)
    #[error("host unreachable: {0}")]
    UnreachableHost(String),

    /// Response was received but could not be parsed into a catalog
    #[error("malformed catalog: {0}")]
    MalformedCatalog(String),

    /// Fetch was aborted before completion
    #[error("fetch cancelled")]
    Cancelled,
}

impl CatalogError {
    /// Check if the fetch is safe to retry with backoff
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, CatalogError::UnreachableHost(_))
    }

    /// Check if this is a caller-initiated abort rather than a failure
    #[must_use]
    pub fn is_cancellation(&self) -> bool {
        matches!(self, CatalogError::Cancelled)
    }
}
