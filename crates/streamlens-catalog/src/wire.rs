//! Catalog wire format
//!
//! A host's catalog endpoint serves a JSON document:
//!
//! ```json
//! { "version": "1", "apps": [ { "id": "42", "title": "Steam", "running": false } ] }
//! ```
//!
//! Parsing is strict about the properties the rest of the system relies on:
//! a supported version and per-host-unique app ids.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CatalogError;
use crate::types::AppEntry;

/// Wire format version this build understands
pub const WIRE_VERSION: &str = "1";

/// Top-level catalog document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogDocument {
    /// Wire format version
    pub version: String,
    /// Applications, in whatever order the host serves them
    pub apps: Vec<WireApp>,
}

/// One application as serialized by the host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireApp {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub running: bool,
}

impl From<WireApp> for AppEntry {
    fn from(app: WireApp) -> Self {
        AppEntry {
            id: app.id,
            title: app.title,
            running: app.running,
        }
    }
}

/// Parse a raw catalog response body into entries
///
/// # Errors
/// Returns `CatalogError::MalformedCatalog` on invalid JSON, an unsupported
/// wire version, an empty app id, or duplicate app ids.
pub fn parse_catalog(body: &str) -> Result<Vec<AppEntry>, CatalogError> {
    let doc: CatalogDocument = serde_json::from_str(body)
        .map_err(|e| CatalogError::MalformedCatalog(format!("invalid JSON: {e}")))?;

    if doc.version != WIRE_VERSION {
        return Err(CatalogError::MalformedCatalog(format!(
            "unsupported catalog version: {}",
            doc.version
        )));
    }

    let mut seen = HashSet::with_capacity(doc.apps.len());
    for app in &doc.apps {
        if app.id.is_empty() {
            return Err(CatalogError::MalformedCatalog(
                "app entry with empty id".to_string(),
            ));
        }
        if !seen.insert(app.id.as_str()) {
            return Err(CatalogError::MalformedCatalog(format!(
                "duplicate app id: {}",
                app.id
            )));
        }
    }

    debug!(apps = doc.apps.len(), "parsed catalog document");

    Ok(doc.apps.into_iter().map(AppEntry::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_catalog() {
        let body = r#"{
            "version": "1",
            "apps": [
                {"id": "1", "title": "Zeta"},
                {"id": "2", "title": "alpha", "running": true}
            ]
        }"#;

        let entries = parse_catalog(body).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "Zeta");
        assert!(!entries[0].running);
        assert!(entries[1].running);
    }

    #[test]
    fn test_parse_empty_catalog() {
        let entries = parse_catalog(r#"{"version": "1", "apps": []}"#).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        let err = parse_catalog("<applist/>").unwrap_err();
        assert!(matches!(err, CatalogError::MalformedCatalog(_)));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_unsupported_version_is_malformed() {
        let err = parse_catalog(r#"{"version": "9", "apps": []}"#).unwrap_err();
        assert!(matches!(err, CatalogError::MalformedCatalog(_)));
    }

    #[test]
    fn test_duplicate_id_is_malformed() {
        let body = r#"{
            "version": "1",
            "apps": [
                {"id": "1", "title": "Steam"},
                {"id": "1", "title": "Desktop"}
            ]
        }"#;

        let err = parse_catalog(body).unwrap_err();
        assert!(matches!(err, CatalogError::MalformedCatalog(ref m) if m.contains("duplicate")));
    }

    #[test]
    fn test_empty_id_is_malformed() {
        let body = r#"{"version": "1", "apps": [{"id": "", "title": "Steam"}]}"#;
        assert!(parse_catalog(body).is_err());
    }

    #[test]
    fn test_document_round_trip() {
        let doc = CatalogDocument {
            version: WIRE_VERSION.to_string(),
            apps: vec![WireApp {
                id: "7".to_string(),
                title: "Retroarch".to_string(),
                running: false,
            }],
        };

        let body = serde_json::to_string(&doc).unwrap();
        let entries = parse_catalog(&body).unwrap();
        assert_eq!(entries[0].id, "7");
    }
}
