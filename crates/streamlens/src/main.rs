//! streamlens daemon
//!
//! Tracks the application catalogs of remote streaming hosts: one kameo actor
//! per host owns the catalog cache and fetch state machine, and an axum HTTP
//! server exposes fetch/cached/invalidate operations plus a WebSocket event
//! feed for the presentation layer.

use std::sync::Arc;

use color_eyre::Result;
use kameo::actor::Spawn;
use tokio::sync::broadcast;
use tracing::info;
use tracing_subscriber::EnvFilter;

use streamlens_core::{RegisterHost, RegistryActor, RegistryActorArgs};

mod api;
mod config;
mod factory;
mod openapi;
mod router;
mod state;

use crate::config::Config;
use crate::factory::HttpTransportFactory;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let config = Config::load_default()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.daemon.log_level)),
        )
        .init();

    let (event_tx, _) = broadcast::channel(config.daemon.event_buffer);

    let registry = RegistryActor::spawn(RegistryActorArgs {
        event_tx: event_tx.clone(),
        transport_factory: Arc::new(HttpTransportFactory),
    });

    for host in &config.host {
        registry
            .ask(RegisterHost {
                config: host.clone(),
            })
            .await
            .map_err(|e| eyre::eyre!("failed to register host {}: {e}", host.name))?;
        info!(host = %host.name, addr = %host.addr, "registered host from config");
    }

    let bind = config.daemon.bind.clone();
    let state = Arc::new(AppState::new(registry, event_tx, config));
    let router = router::create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    info!(bind = %bind, "streamlens daemon listening");

    axum::serve(listener, router).await?;

    Ok(())
}
