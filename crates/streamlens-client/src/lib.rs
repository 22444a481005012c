//! streamlens-client: HTTP and WebSocket client library
//!
//! Provides both HTTP and WebSocket clients for communicating with the
//! streamlens daemon. This is the surface a presentation layer builds on.
//!
//! # Examples
//!
//! ## HTTP Client
//!
//! ```no_run
//! use streamlens_client::HttpClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new("http://localhost:8080")?;
//!
//! // List hosts
//! let hosts = client.list_hosts(None).await?;
//!
//! // Refresh a host's catalog and render the fresh snapshot
//! let snapshot = client.refresh("mediapc").await?;
//! for app in &snapshot.apps {
//!     println!("{} ({})", app.title, app.id);
//! }
//!
//! // Cached lookup, no network call on the host side
//! let cached = client.cached_apps("mediapc").await?;
//! if cached.snapshot.is_none() {
//!     println!("nothing cached yet");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## WebSocket Client
//!
//! ```no_run
//! use streamlens_client::WsClient;
//! use streamlens_api::events::CatalogEvent;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut client = WsClient::connect("ws://localhost:8080/ws/events").await?;
//!
//! while let Some(event) = client.recv().await {
//!     match event {
//!         CatalogEvent::CatalogReady { host, app_count, .. } => {
//!             println!("{host}: {app_count} apps");
//!         }
//!         CatalogEvent::CatalogFailed { host, error, .. } => {
//!             println!("{host}: {error}");
//!         }
//!         _ => {}
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod http;
pub mod ws;

pub use error::{ClientError, Result};
pub use http::HttpClient;
pub use ws::WsClient;
