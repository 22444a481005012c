//! `RegistryActor`: host table and operation routing
//!
//! Owns the registry of `HostActor`s keyed by host name and routes catalog
//! operations to them. Consumers address hosts by name only; the registry
//! and host actors own all host and snapshot state.

use std::collections::HashMap;
use std::sync::Arc;

use kameo::actor::{ActorRef, WeakActorRef};
use kameo::error::ActorStopReason;
use kameo::message::{Context, Message};
use kameo::prelude::*;
use tokio::sync::broadcast;
use tracing::{info, warn};

use streamlens_api::events::CatalogEvent;
use streamlens_transport::CatalogTransport;

use crate::actor::host::{HostActor, HostActorArgs};
use crate::config::HostConfig;
use crate::error::CoreError;
use crate::message::{
    CachedCatalog, CancelFetch, CancelHostFetch, FetchCatalog, FetchHandle, FetchHostCatalog,
    GetCached, GetCachedCatalog, GetHostStatus, GetStatus, HostCatalogStatus, Invalidate,
    InvalidateCatalog, ListHosts, RegisterHost, UnregisterHost,
};

/// Factory trait for creating a host's catalog transport
///
/// Allows injection of different transports per host (HTTP in production,
/// mocks in tests).
#[async_trait::async_trait]
pub trait CatalogTransportFactory: Send + Sync {
    /// Create a transport bound to the given host config
    async fn create_transport(
        &self,
        config: &HostConfig,
    ) -> Result<Arc<dyn CatalogTransport>, CoreError>;
}

/// Arguments for spawning a `RegistryActor`
pub struct RegistryActorArgs {
    /// Event broadcast sender shared with every host actor
    pub event_tx: broadcast::Sender<CatalogEvent>,
    /// Factory for creating host transports
    pub transport_factory: Arc<dyn CatalogTransportFactory>,
}

/// Registry managing all host actors
pub struct RegistryActor {
    /// Registry of host actors by host name
    hosts: HashMap<String, ActorRef<HostActor>>,
    /// Host configurations
    configs: HashMap<String, HostConfig>,
    /// Event broadcast sender
    event_tx: broadcast::Sender<CatalogEvent>,
    /// Factory for creating host transports
    transport_factory: Arc<dyn CatalogTransportFactory>,
}

impl RegistryActor {
    /// Get number of registered hosts
    #[must_use]
    pub fn host_count(&self) -> usize {
        self.hosts.len()
    }

    /// Spawn a `HostActor` for the given config
    async fn spawn_host_actor(
        &mut self,
        config: HostConfig,
    ) -> Result<ActorRef<HostActor>, CoreError> {
        let transport = self.transport_factory.create_transport(&config).await?;

        let args = HostActorArgs {
            config: config.clone(),
            transport,
            event_tx: self.event_tx.clone(),
        };

        let actor_ref = HostActor::spawn(args);

        info!(host = %config.name, "spawned HostActor");

        Ok(actor_ref)
    }

    fn host_ref(&self, host: &str) -> Result<&ActorRef<HostActor>, CoreError> {
        self.hosts
            .get(host)
            .ok_or_else(|| CoreError::HostNotFound(host.to_string()))
    }
}

impl Actor for RegistryActor {
    type Args = RegistryActorArgs;
    type Error = CoreError;

    async fn on_start(args: Self::Args, actor_ref: ActorRef<Self>) -> Result<Self, Self::Error> {
        info!(id = %actor_ref.id(), "RegistryActor starting");

        Ok(Self {
            hosts: HashMap::new(),
            configs: HashMap::new(),
            event_tx: args.event_tx,
            transport_factory: args.transport_factory,
        })
    }

    async fn on_stop(
        &mut self,
        _actor_ref: WeakActorRef<Self>,
        reason: ActorStopReason,
    ) -> Result<(), Self::Error> {
        info!(reason = ?reason, "RegistryActor stopping");

        for (name, actor_ref) in &self.hosts {
            info!(host = %name, "stopping HostActor");
            actor_ref.stop_gracefully().await.ok();
        }

        Ok(())
    }
}

// ============================================================================
// Message Handlers
// ============================================================================

impl Message<RegisterHost> for RegistryActor {
    type Reply = Result<(), CoreError>;

    async fn handle(
        &mut self,
        msg: RegisterHost,
        _ctx: &mut Context<Self, Self::Reply>,
    ) -> Self::Reply {
        let name = msg.config.name.clone();

        if self.hosts.contains_key(&name) {
            return Err(CoreError::HostAlreadyExists(name));
        }

        let actor_ref = self.spawn_host_actor(msg.config.clone()).await?;
        self.hosts.insert(name.clone(), actor_ref);
        self.configs.insert(name, msg.config);

        Ok(())
    }
}

impl Message<UnregisterHost> for RegistryActor {
    type Reply = Result<(), CoreError>;

    async fn handle(
        &mut self,
        msg: UnregisterHost,
        _ctx: &mut Context<Self, Self::Reply>,
    ) -> Self::Reply {
        let name = &msg.host;

        if let Some(actor_ref) = self.hosts.remove(name) {
            self.configs.remove(name);
            actor_ref.stop_gracefully().await.ok();
            info!(host = %name, "unregistered host");
            Ok(())
        } else {
            Err(CoreError::HostNotFound(name.clone()))
        }
    }
}

impl Message<FetchHostCatalog> for RegistryActor {
    type Reply = Result<FetchHandle, CoreError>;

    async fn handle(
        &mut self,
        msg: FetchHostCatalog,
        _ctx: &mut Context<Self, Self::Reply>,
    ) -> Self::Reply {
        let actor_ref = self.host_ref(&msg.host)?;

        // The handle comes back immediately; the caller awaits the outcome
        // outside both actors.
        match actor_ref.ask(FetchCatalog).await {
            Ok(handle) => Ok(handle),
            Err(e) => Err(CoreError::ActorError(e.to_string())),
        }
    }
}

impl Message<GetCachedCatalog> for RegistryActor {
    type Reply = Result<CachedCatalog, CoreError>;

    async fn handle(
        &mut self,
        msg: GetCachedCatalog,
        _ctx: &mut Context<Self, Self::Reply>,
    ) -> Self::Reply {
        let actor_ref = self.host_ref(&msg.host)?;

        match actor_ref.ask(GetCached).await {
            Ok(cached) => Ok(cached),
            Err(e) => Err(CoreError::ActorError(e.to_string())),
        }
    }
}

impl Message<InvalidateCatalog> for RegistryActor {
    type Reply = Result<(), CoreError>;

    async fn handle(
        &mut self,
        msg: InvalidateCatalog,
        _ctx: &mut Context<Self, Self::Reply>,
    ) -> Self::Reply {
        let actor_ref = self.host_ref(&msg.host)?;

        match actor_ref.ask(Invalidate).await {
            Ok(()) => Ok(()),
            Err(e) => Err(CoreError::ActorError(e.to_string())),
        }
    }
}

impl Message<CancelHostFetch> for RegistryActor {
    type Reply = Result<bool, CoreError>;

    async fn handle(
        &mut self,
        msg: CancelHostFetch,
        _ctx: &mut Context<Self, Self::Reply>,
    ) -> Self::Reply {
        let actor_ref = self.host_ref(&msg.host)?;

        match actor_ref.ask(CancelFetch).await {
            Ok(cancelled) => Ok(cancelled),
            Err(e) => Err(CoreError::ActorError(e.to_string())),
        }
    }
}

impl Message<GetHostStatus> for RegistryActor {
    type Reply = Result<HostCatalogStatus, CoreError>;

    async fn handle(
        &mut self,
        msg: GetHostStatus,
        _ctx: &mut Context<Self, Self::Reply>,
    ) -> Self::Reply {
        let actor_ref = self.host_ref(&msg.host)?;

        actor_ref
            .ask(GetStatus)
            .await
            .map_err(|e| CoreError::ActorError(e.to_string()))
    }
}

impl Message<ListHosts> for RegistryActor {
    type Reply = Vec<HostCatalogStatus>;

    async fn handle(
        &mut self,
        _msg: ListHosts,
        _ctx: &mut Context<Self, Self::Reply>,
    ) -> Self::Reply {
        let mut statuses = Vec::with_capacity(self.hosts.len());

        for (name, actor_ref) in &self.hosts {
            match actor_ref.ask(GetStatus).await {
                Ok(status) => statuses.push(status),
                Err(e) => {
                    warn!(host = %name, error = %e, "failed to get host status");
                }
            }
        }

        statuses
    }
}
