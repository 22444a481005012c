//! Application state shared across HTTP handlers

use std::sync::Arc;

use kameo::actor::ActorRef;
use tokio::sync::broadcast;

use streamlens_api::events::CatalogEvent;
use streamlens_core::RegistryActor;

use crate::config::Config;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Reference to the registry actor
    pub registry: ActorRef<RegistryActor>,
    /// Event broadcast sender, subscribed per WebSocket connection
    pub events: broadcast::Sender<CatalogEvent>,
    /// Application configuration
    #[allow(dead_code)]
    pub config: Arc<Config>,
}

impl AppState {
    /// Create new application state
    pub fn new(
        registry: ActorRef<RegistryActor>,
        events: broadcast::Sender<CatalogEvent>,
        config: Config,
    ) -> Self {
        Self {
            registry,
            events,
            config: Arc::new(config),
        }
    }
}
