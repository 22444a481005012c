//! `HostActor`: per-host catalog inventory
//!
//! Owns the cached snapshot and fetch state machine for a single streaming
//! host. Fetches run in spawned tasks so the mailbox stays responsive;
//! concurrent fetch requests join the in-flight operation instead of issuing
//! a second transport call.

use std::sync::Arc;

use chrono::Utc;
use kameo::actor::{ActorRef, WeakActorRef};
use kameo::error::ActorStopReason;
use kameo::message::{Context, Message};
use kameo::prelude::*;
use tokio::sync::{broadcast, oneshot};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use streamlens_api::events::CatalogEvent;
use streamlens_catalog::{wire, CatalogError, InventorySnapshot};
use streamlens_transport::CatalogTransport;

use crate::config::HostConfig;
use crate::error::CoreError;
use crate::message::{
    CachedCatalog, CancelFetch, FetchCatalog, FetchHandle, FetchOutcome, FetchSettled, GetCached,
    GetState, GetStatus, HostCatalogStatus, Invalidate,
};
use crate::state::{CatalogState, FetchFailure};

/// Arguments for spawning a `HostActor`
pub struct HostActorArgs {
    /// Host configuration
    pub config: HostConfig,
    /// Transport bound to this host's catalog endpoint
    pub transport: Arc<dyn CatalogTransport>,
    /// Event broadcast sender for WebSocket
    pub event_tx: broadcast::Sender<CatalogEvent>,
}

/// Bookkeeping for the single permitted in-flight fetch
struct InFlight {
    /// Cancels the spawned fetch task
    token: CancellationToken,
    /// Every caller waiting on this fetch
    waiters: Vec<oneshot::Sender<FetchOutcome>>,
}

/// Per-host actor owning the catalog cache and state machine
pub struct HostActor {
    /// Host configuration
    config: HostConfig,
    /// Current state
    state: CatalogState,
    /// Last successful snapshot
    cached: Option<Arc<InventorySnapshot>>,
    /// In-flight fetch, at most one
    in_flight: Option<InFlight>,
    /// Most recent failed fetch
    last_error: Option<FetchFailure>,
    /// Failed fetches since the last success
    consecutive_failures: u32,
    /// Transport bound to this host
    transport: Arc<dyn CatalogTransport>,
    /// Event broadcast sender
    event_tx: broadcast::Sender<CatalogEvent>,
    /// Self reference for spawned fetch tasks to report back
    self_ref: WeakActorRef<Self>,
}

impl HostActor {
    /// Get the host name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Get current state
    #[must_use]
    pub fn state(&self) -> CatalogState {
        self.state
    }

    /// Resting state dictated by the current cache contents
    fn resting_state(&self) -> CatalogState {
        if self.cached.is_some() {
            CatalogState::Ready
        } else {
            CatalogState::Unfetched
        }
    }

    /// Transition to a new state with validation and event emission
    fn transition_to(&mut self, new_state: CatalogState) -> Result<(), CoreError> {
        if !self.state.can_transition_to(new_state) {
            return Err(CoreError::InvalidTransition {
                from: self.state,
                to: new_state,
            });
        }

        let old_state = self.state;
        self.state = new_state;

        info!(
            host = %self.config.name,
            from = %old_state,
            to = %new_state,
            "state transition"
        );

        let event = CatalogEvent::StateChanged {
            host: self.config.name.clone(),
            from: old_state.to_string(),
            to: new_state.to_string(),
        };
        // Ignore send errors (no subscribers is fine)
        let _ = self.event_tx.send(event);

        Ok(())
    }

    /// Spawn the fetch task for a freshly started fetch
    fn spawn_fetch(&self, token: CancellationToken) {
        let transport = Arc::clone(&self.transport);
        let host = self.config.name.clone();
        let self_ref = self.self_ref.clone();

        tokio::spawn(async move {
            let result = tokio::select! {
                () = token.cancelled() => Err(CatalogError::Cancelled),
                res = fetch_snapshot(transport, &host) => res,
            };

            if let Some(actor) = self_ref.upgrade() {
                let _ = actor.tell(FetchSettled { result }).await;
            }
        });
    }
}

/// Fetch and parse one catalog snapshot
async fn fetch_snapshot(
    transport: Arc<dyn CatalogTransport>,
    host: &str,
) -> Result<InventorySnapshot, CatalogError> {
    let body = transport
        .fetch_raw()
        .await
        .map_err(|e| CatalogError::UnreachableHost(e.to_string()))?;

    let entries = wire::parse_catalog(&body)?;

    Ok(InventorySnapshot::from_entries(host, entries))
}

impl Actor for HostActor {
    type Args = HostActorArgs;
    type Error = CoreError;

    async fn on_start(args: Self::Args, actor_ref: ActorRef<Self>) -> Result<Self, Self::Error> {
        info!(host = %args.config.name, id = %actor_ref.id(), "HostActor starting");

        let event = CatalogEvent::HostRegistered {
            host: args.config.name.clone(),
        };
        let _ = args.event_tx.send(event);

        Ok(Self {
            config: args.config,
            state: CatalogState::Unfetched,
            cached: None,
            in_flight: None,
            last_error: None,
            consecutive_failures: 0,
            transport: args.transport,
            event_tx: args.event_tx,
            self_ref: actor_ref.downgrade(),
        })
    }

    async fn on_stop(
        &mut self,
        _actor_ref: WeakActorRef<Self>,
        reason: ActorStopReason,
    ) -> Result<(), Self::Error> {
        info!(
            host = %self.config.name,
            reason = ?reason,
            "HostActor stopping"
        );

        // Abort the in-flight fetch; dropped waiters read as Cancelled
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.token.cancel();
        }

        let event = CatalogEvent::HostRemoved {
            host: self.config.name.clone(),
            reason: format!("{reason:?}"),
        };
        let _ = self.event_tx.send(event);

        Ok(())
    }
}

// ============================================================================
// Message Handlers
// ============================================================================

impl Message<FetchCatalog> for HostActor {
    type Reply = Result<FetchHandle, CoreError>;

    async fn handle(
        &mut self,
        _msg: FetchCatalog,
        _ctx: &mut Context<Self, Self::Reply>,
    ) -> Self::Reply {
        let (tx, rx) = oneshot::channel();

        // Join the in-flight fetch rather than issuing a duplicate request
        if let Some(in_flight) = self.in_flight.as_mut() {
            in_flight.waiters.push(tx);
            debug!(
                host = %self.config.name,
                waiters = in_flight.waiters.len(),
                "joined in-flight fetch"
            );
            return Ok(FetchHandle::new(rx));
        }

        self.transition_to(CatalogState::Fetching)?;

        let token = CancellationToken::new();
        self.in_flight = Some(InFlight {
            token: token.clone(),
            waiters: vec![tx],
        });
        self.spawn_fetch(token);

        Ok(FetchHandle::new(rx))
    }
}

impl Message<FetchSettled> for HostActor {
    type Reply = ();

    async fn handle(
        &mut self,
        msg: FetchSettled,
        _ctx: &mut Context<Self, Self::Reply>,
    ) -> Self::Reply {
        // Settlement after teardown or cancel-cleanup has nothing to do
        let Some(in_flight) = self.in_flight.take() else {
            return;
        };

        match msg.result {
            Ok(snapshot) => {
                let snapshot = Arc::new(snapshot);
                self.cached = Some(Arc::clone(&snapshot));
                self.last_error = None;
                self.consecutive_failures = 0;
                let _ = self.transition_to(CatalogState::Ready);

                info!(
                    host = %self.config.name,
                    apps = snapshot.len(),
                    "catalog ready"
                );

                let event = CatalogEvent::CatalogReady {
                    host: self.config.name.clone(),
                    app_count: snapshot.len(),
                    fetched_at: snapshot.fetched_at.to_rfc3339(),
                };
                let _ = self.event_tx.send(event);

                for waiter in in_flight.waiters {
                    let _ = waiter.send(Ok(Arc::clone(&snapshot)));
                }
            }
            Err(CatalogError::Cancelled) => {
                let _ = self.transition_to(self.resting_state());

                info!(host = %self.config.name, "fetch cancelled");

                for waiter in in_flight.waiters {
                    let _ = waiter.send(Err(CatalogError::Cancelled));
                }
            }
            Err(error) => {
                self.consecutive_failures += 1;
                self.last_error = Some(FetchFailure {
                    error: error.clone(),
                    failed_at: Utc::now(),
                    consecutive_failures: self.consecutive_failures,
                });
                // Stale snapshot is retained; the host rests on whatever it has
                let _ = self.transition_to(self.resting_state());

                warn!(
                    host = %self.config.name,
                    error = %error,
                    stale_retained = self.cached.is_some(),
                    "fetch failed"
                );

                let event = CatalogEvent::CatalogFailed {
                    host: self.config.name.clone(),
                    error: error.to_string(),
                    stale_retained: self.cached.is_some(),
                };
                let _ = self.event_tx.send(event);

                for waiter in in_flight.waiters {
                    let _ = waiter.send(Err(error.clone()));
                }
            }
        }
    }
}

impl Message<GetCached> for HostActor {
    type Reply = CachedCatalog;

    async fn handle(
        &mut self,
        _msg: GetCached,
        _ctx: &mut Context<Self, Self::Reply>,
    ) -> Self::Reply {
        CachedCatalog {
            snapshot: self.cached.clone(),
        }
    }
}

impl Message<Invalidate> for HostActor {
    type Reply = ();

    async fn handle(
        &mut self,
        _msg: Invalidate,
        _ctx: &mut Context<Self, Self::Reply>,
    ) -> Self::Reply {
        self.cached = None;

        // An in-flight fetch keeps running and repopulates the cache on
        // success; settlement computes its resting state from the (now empty)
        // cache, so nothing else to do while Fetching.
        if self.state == CatalogState::Ready {
            let _ = self.transition_to(CatalogState::Unfetched);
        }

        info!(host = %self.config.name, "cache invalidated");
    }
}

impl Message<CancelFetch> for HostActor {
    type Reply = bool;

    async fn handle(
        &mut self,
        _msg: CancelFetch,
        _ctx: &mut Context<Self, Self::Reply>,
    ) -> Self::Reply {
        match self.in_flight.as_ref() {
            Some(in_flight) => {
                // Cancellation races completion: a fetch whose transport call
                // already finished settles normally despite the cancel.
                in_flight.token.cancel();
                info!(host = %self.config.name, "cancelling in-flight fetch");
                true
            }
            None => false,
        }
    }
}

impl Message<GetState> for HostActor {
    type Reply = CatalogState;

    async fn handle(
        &mut self,
        _msg: GetState,
        _ctx: &mut Context<Self, Self::Reply>,
    ) -> Self::Reply {
        self.state
    }
}

impl Message<GetStatus> for HostActor {
    type Reply = HostCatalogStatus;

    async fn handle(
        &mut self,
        _msg: GetStatus,
        _ctx: &mut Context<Self, Self::Reply>,
    ) -> Self::Reply {
        HostCatalogStatus {
            name: self.config.name.clone(),
            display_name: self
                .config
                .display_name
                .clone()
                .unwrap_or_else(|| self.config.name.clone()),
            state: self.state,
            app_count: self.cached.as_ref().map(|s| s.len()),
            fetched_at: self.cached.as_ref().map(|s| s.fetched_at),
            last_error: self.last_error.clone(),
            tags: self.config.tags.clone(),
        }
    }
}
