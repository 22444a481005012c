//! streamlens-catalog: application catalog domain types
//!
//! Defines the entities a streaming host's catalog is made of (`AppEntry`,
//! `InventorySnapshot`) along with the wire format the catalog endpoint
//! serves and the error taxonomy for fetches.

pub mod error;
pub mod types;
pub mod wire;

pub use error::CatalogError;
pub use types::{AppEntry, InventorySnapshot};
