//! Catalog type definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One launchable application exposed by a host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppEntry {
    /// Application identifier, unique per host
    pub id: String,
    /// Display title
    pub title: String,
    /// Whether the application is currently running on the host
    pub running: bool,
}

impl AppEntry {
    /// Create a new entry
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            running: false,
        }
    }

    /// Mark the entry as currently running
    #[must_use]
    pub fn running(mut self, running: bool) -> Self {
        self.running = running;
        self
    }
}

/// Immutable point-in-time view of a host's application catalog
///
/// Snapshots are never mutated after creation; consumers share them behind
/// `Arc` and a re-fetch produces a new snapshot rather than editing this one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    /// Host the snapshot belongs to
    pub host: String,
    /// Entries in canonical order
    entries: Vec<AppEntry>,
    /// When the catalog was fetched
    pub fetched_at: DateTime<Utc>,
}

impl InventorySnapshot {
    /// Build a snapshot, applying the canonical entry ordering:
    /// title ascending, case-insensitive, ties broken by id.
    #[must_use]
    pub fn from_entries(host: impl Into<String>, mut entries: Vec<AppEntry>) -> Self {
        entries.sort_by(|a, b| {
            a.title
                .to_lowercase()
                .cmp(&b.title.to_lowercase())
                .then_with(|| a.id.cmp(&b.id))
        });

        Self {
            host: host.into(),
            entries,
            fetched_at: Utc::now(),
        }
    }

    /// Entries in canonical order
    #[must_use]
    pub fn entries(&self) -> &[AppEntry] {
        &self.entries
    }

    /// Number of applications in the snapshot
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the catalog is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by application id
    #[must_use]
    pub fn entry(&self, id: &str) -> Option<&AppEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Entries currently running on the host
    #[must_use]
    pub fn running_entries(&self) -> Vec<&AppEntry> {
        self.entries.iter().filter(|e| e.running).collect()
    }
}
