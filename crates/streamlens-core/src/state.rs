//! Catalog state machine types

use std::fmt;

use chrono::{DateTime, Utc};
use kameo_macros::Reply;

use streamlens_catalog::CatalogError;

/// States of a host's catalog.
///
/// `Unfetched` and `Ready` are resting states; `Fetching` is transient. A
/// failed or cancelled fetch settles back into whichever resting state the
/// cache contents dictate: `Ready` while a stale snapshot is retained,
/// `Unfetched` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reply)]
pub enum CatalogState {
    /// No snapshot cached (never fetched, or invalidated)
    Unfetched,
    /// A fetch is in flight
    Fetching,
    /// A snapshot is cached
    Ready,
}

impl CatalogState {
    /// Check if a transition to `to` is legal
    #[must_use]
    pub fn can_transition_to(self, to: CatalogState) -> bool {
        matches!(
            (self, to),
            // start a fetch from either resting state
            (CatalogState::Unfetched | CatalogState::Ready, CatalogState::Fetching)
                // settle a fetch
                | (CatalogState::Fetching, CatalogState::Ready | CatalogState::Unfetched)
                // invalidate
                | (CatalogState::Ready, CatalogState::Unfetched)
        )
    }

    /// Check if a fetch is in flight
    #[must_use]
    pub fn is_fetching(self) -> bool {
        self == CatalogState::Fetching
    }
}

impl fmt::Display for CatalogState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CatalogState::Unfetched => "unfetched",
            CatalogState::Fetching => "fetching",
            CatalogState::Ready => "ready",
        };
        write!(f, "{s}")
    }
}

/// Details of the most recent failed fetch
#[derive(Debug, Clone)]
pub struct FetchFailure {
    /// What went wrong
    pub error: CatalogError,
    /// When the fetch failed
    pub failed_at: DateTime<Utc>,
    /// Failed fetches since the last success
    pub consecutive_failures: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legal_transitions() {
        assert!(CatalogState::Unfetched.can_transition_to(CatalogState::Fetching));
        assert!(CatalogState::Ready.can_transition_to(CatalogState::Fetching));
        assert!(CatalogState::Fetching.can_transition_to(CatalogState::Ready));
        assert!(CatalogState::Fetching.can_transition_to(CatalogState::Unfetched));
        assert!(CatalogState::Ready.can_transition_to(CatalogState::Unfetched));
    }

    #[test]
    fn test_illegal_transitions() {
        assert!(!CatalogState::Unfetched.can_transition_to(CatalogState::Ready));
        assert!(!CatalogState::Fetching.can_transition_to(CatalogState::Fetching));
        assert!(!CatalogState::Unfetched.can_transition_to(CatalogState::Unfetched));
    }

    #[test]
    fn test_display() {
        assert_eq!(CatalogState::Fetching.to_string(), "fetching");
    }
}
