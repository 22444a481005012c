//! streamlens-api: Shared API types and schemas
//!
//! Contains request/response types, event types, and OpenAPI schema definitions
//! used across the daemon, CLI, and client library.

pub mod requests;
pub mod responses;
pub mod events;
