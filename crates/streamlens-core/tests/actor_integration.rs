use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use kameo::actor::Spawn;
use tokio::sync::broadcast;

use streamlens_api::events::CatalogEvent;
use streamlens_catalog::CatalogError;
use streamlens_core::*;
use streamlens_transport::error::TransportError;
use streamlens_transport::traits::CatalogTransport;

const CATALOG: &str =
    r#"{"version":"1","apps":[{"id":"1","title":"Zeta"},{"id":"2","title":"alpha"}]}"#;

// Mock implementations

/// Serves the same body on every call, after an optional delay
struct StaticTransport {
    body: String,
    delay: Duration,
    calls: Arc<AtomicUsize>,
}

impl StaticTransport {
    fn new(body: &str, delay: Duration) -> Self {
        Self {
            body: body.to_string(),
            delay,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl CatalogTransport for StaticTransport {
    async fn fetch_raw(&self) -> Result<String, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(self.body.clone())
    }

    fn endpoint(&self) -> &str {
        "mock://static"
    }

    fn transport_type(&self) -> &'static str {
        "mock"
    }
}

/// Pops one scripted (delay, result) per call; panics when the script runs dry
struct ScriptedTransport {
    script: Mutex<VecDeque<(Duration, Result<String, TransportError>)>>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedTransport {
    fn new(script: Vec<(Duration, Result<String, TransportError>)>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl CatalogTransport for ScriptedTransport {
    async fn fetch_raw(&self) -> Result<String, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let (delay, result) = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .expect("scripted transport exhausted");
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        result
    }

    fn endpoint(&self) -> &str {
        "mock://scripted"
    }

    fn transport_type(&self) -> &'static str {
        "mock"
    }
}

struct TestTransportFactory {
    transport: Arc<dyn CatalogTransport>,
}

#[async_trait]
impl CatalogTransportFactory for TestTransportFactory {
    async fn create_transport(
        &self,
        _config: &HostConfig,
    ) -> Result<Arc<dyn CatalogTransport>, CoreError> {
        Ok(Arc::clone(&self.transport))
    }
}

fn host_config(name: &str) -> HostConfig {
    HostConfig {
        name: name.to_string(),
        addr: "127.0.0.1".to_string(),
        port: DEFAULT_CATALOG_PORT,
        display_name: None,
        tags: vec!["test".to_string()],
        policy: CatalogPolicy::default(),
    }
}

fn spawn_host(transport: Arc<dyn CatalogTransport>) -> kameo::actor::ActorRef<HostActor> {
    let (tx, _rx) = broadcast::channel(100);
    HostActor::spawn(HostActorArgs {
        config: host_config("mediapc"),
        transport,
        event_tx: tx,
    })
}

// HostActor tests

#[tokio::test]
async fn test_fetch_then_cached_returns_same_snapshot() {
    let actor = spawn_host(Arc::new(StaticTransport::new(CATALOG, Duration::ZERO)));

    let handle = actor.ask(FetchCatalog).await.unwrap();
    let snapshot = handle.outcome().await.unwrap();

    // Canonical ordering: case-insensitive title sort
    let titles: Vec<&str> = snapshot.entries().iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["alpha", "Zeta"]);

    let cached = actor.ask(GetCached).await.unwrap();
    let cached = cached.snapshot.expect("snapshot should be cached");
    assert_eq!(cached.entries(), snapshot.entries());

    let state = actor.ask(GetState).await.unwrap();
    assert_eq!(state, CatalogState::Ready);

    actor.stop_gracefully().await.unwrap();
}

#[tokio::test]
async fn test_invalidate_clears_cache() {
    let actor = spawn_host(Arc::new(StaticTransport::new(CATALOG, Duration::ZERO)));

    let handle = actor.ask(FetchCatalog).await.unwrap();
    handle.outcome().await.unwrap();

    actor.ask(Invalidate).await.unwrap();

    let cached = actor.ask(GetCached).await.unwrap();
    assert!(cached.snapshot.is_none());

    let state = actor.ask(GetState).await.unwrap();
    assert_eq!(state, CatalogState::Unfetched);

    actor.stop_gracefully().await.unwrap();
}

#[tokio::test]
async fn test_concurrent_fetches_share_one_request() {
    let transport = Arc::new(StaticTransport::new(CATALOG, Duration::from_millis(100)));
    let calls = Arc::clone(&transport.calls);
    let actor = spawn_host(transport);

    let first = actor.ask(FetchCatalog).await.unwrap();
    let second = actor.ask(FetchCatalog).await.unwrap();

    let (a, b) = tokio::join!(first.outcome(), second.outcome());
    let a = a.unwrap();
    let b = b.unwrap();

    assert_eq!(a.entries(), b.entries());
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    actor.stop_gracefully().await.unwrap();
}

#[tokio::test]
async fn test_failed_fetch_keeps_stale_snapshot() {
    let transport = Arc::new(ScriptedTransport::new(vec![
        (Duration::ZERO, Ok(CATALOG.to_string())),
        (
            Duration::ZERO,
            Err(TransportError::ConnectionFailed("refused".to_string())),
        ),
    ]));
    let actor = spawn_host(transport);

    let handle = actor.ask(FetchCatalog).await.unwrap();
    let first = handle.outcome().await.unwrap();

    let handle = actor.ask(FetchCatalog).await.unwrap();
    let err = handle.outcome().await.unwrap_err();
    assert!(matches!(err, CatalogError::UnreachableHost(_)));
    assert!(err.is_retryable());

    // Stale snapshot survives the failure
    let cached = actor.ask(GetCached).await.unwrap();
    assert_eq!(cached.snapshot.unwrap().entries(), first.entries());

    let status = actor.ask(GetStatus).await.unwrap();
    assert_eq!(status.state, CatalogState::Ready);
    let failure = status.last_error.expect("failure should be recorded");
    assert_eq!(failure.consecutive_failures, 1);

    actor.stop_gracefully().await.unwrap();
}

#[tokio::test]
async fn test_failed_fetch_without_snapshot_surfaces_error() {
    let transport = Arc::new(ScriptedTransport::new(vec![(
        Duration::ZERO,
        Err(TransportError::Timeout {
            timeout: Duration::from_secs(10),
        }),
    )]));
    let actor = spawn_host(transport);

    let handle = actor.ask(FetchCatalog).await.unwrap();
    let err = handle.outcome().await.unwrap_err();
    assert!(matches!(err, CatalogError::UnreachableHost(_)));

    let cached = actor.ask(GetCached).await.unwrap();
    assert!(cached.snapshot.is_none());

    let state = actor.ask(GetState).await.unwrap();
    assert_eq!(state, CatalogState::Unfetched);

    actor.stop_gracefully().await.unwrap();
}

#[tokio::test]
async fn test_malformed_catalog_is_not_retryable() {
    let actor = spawn_host(Arc::new(StaticTransport::new("<applist/>", Duration::ZERO)));

    let handle = actor.ask(FetchCatalog).await.unwrap();
    let err = handle.outcome().await.unwrap_err();
    assert!(matches!(err, CatalogError::MalformedCatalog(_)));
    assert!(!err.is_retryable());

    actor.stop_gracefully().await.unwrap();
}

#[tokio::test]
async fn test_cancel_restores_unfetched_state() {
    let actor = spawn_host(Arc::new(StaticTransport::new(
        CATALOG,
        Duration::from_secs(30),
    )));

    let handle = actor.ask(FetchCatalog).await.unwrap();

    let cancelled = actor.ask(CancelFetch).await.unwrap();
    assert!(cancelled);

    let err = handle.outcome().await.unwrap_err();
    assert!(err.is_cancellation());

    let cached = actor.ask(GetCached).await.unwrap();
    assert!(cached.snapshot.is_none());

    let state = actor.ask(GetState).await.unwrap();
    assert_eq!(state, CatalogState::Unfetched);

    actor.stop_gracefully().await.unwrap();
}

#[tokio::test]
async fn test_cancel_leaves_cached_snapshot_untouched() {
    let transport = Arc::new(ScriptedTransport::new(vec![
        (Duration::ZERO, Ok(CATALOG.to_string())),
        (Duration::from_secs(30), Ok(CATALOG.to_string())),
    ]));
    let actor = spawn_host(transport);

    let handle = actor.ask(FetchCatalog).await.unwrap();
    let first = handle.outcome().await.unwrap();

    let handle = actor.ask(FetchCatalog).await.unwrap();
    assert!(actor.ask(CancelFetch).await.unwrap());
    assert!(handle.outcome().await.unwrap_err().is_cancellation());

    // Pre-fetch state restored, snapshot unchanged
    let state = actor.ask(GetState).await.unwrap();
    assert_eq!(state, CatalogState::Ready);
    let cached = actor.ask(GetCached).await.unwrap();
    assert_eq!(cached.snapshot.unwrap().entries(), first.entries());

    actor.stop_gracefully().await.unwrap();
}

#[tokio::test]
async fn test_cancel_without_fetch_is_noop() {
    let actor = spawn_host(Arc::new(StaticTransport::new(CATALOG, Duration::ZERO)));

    let cancelled = actor.ask(CancelFetch).await.unwrap();
    assert!(!cancelled);

    actor.stop_gracefully().await.unwrap();
}

#[tokio::test]
async fn test_ready_and_failed_events_emitted() {
    let (tx, mut rx) = broadcast::channel(100);
    let transport = Arc::new(ScriptedTransport::new(vec![
        (Duration::ZERO, Ok(CATALOG.to_string())),
        (
            Duration::ZERO,
            Err(TransportError::ConnectionFailed("refused".to_string())),
        ),
    ]));
    let actor = HostActor::spawn(HostActorArgs {
        config: host_config("mediapc"),
        transport,
        event_tx: tx,
    });

    let handle = actor.ask(FetchCatalog).await.unwrap();
    handle.outcome().await.unwrap();

    let handle = actor.ask(FetchCatalog).await.unwrap();
    let _ = handle.outcome().await;

    let mut saw_ready = false;
    let mut saw_failed = false;
    while let Ok(event) = rx.try_recv() {
        match event {
            CatalogEvent::CatalogReady {
                host, app_count, ..
            } => {
                assert_eq!(host, "mediapc");
                assert_eq!(app_count, 2);
                saw_ready = true;
            }
            CatalogEvent::CatalogFailed {
                host,
                stale_retained,
                ..
            } => {
                assert_eq!(host, "mediapc");
                assert!(stale_retained);
                saw_failed = true;
            }
            _ => {}
        }
    }
    assert!(saw_ready);
    assert!(saw_failed);

    actor.stop_gracefully().await.unwrap();
}

// RegistryActor tests

#[tokio::test]
async fn test_registry_register_and_list() {
    let (tx, _rx) = broadcast::channel(100);
    let registry = RegistryActor::spawn(RegistryActorArgs {
        event_tx: tx,
        transport_factory: Arc::new(TestTransportFactory {
            transport: Arc::new(StaticTransport::new(CATALOG, Duration::ZERO)),
        }),
    });

    registry
        .ask(RegisterHost {
            config: host_config("mediapc"),
        })
        .await
        .unwrap();

    let hosts = registry.ask(ListHosts).await.unwrap();
    assert_eq!(hosts.len(), 1);
    assert_eq!(hosts[0].name, "mediapc");
    assert_eq!(hosts[0].state, CatalogState::Unfetched);

    registry.stop_gracefully().await.unwrap();
}

#[tokio::test]
async fn test_registry_rejects_duplicate_host() {
    let (tx, _rx) = broadcast::channel(100);
    let registry = RegistryActor::spawn(RegistryActorArgs {
        event_tx: tx,
        transport_factory: Arc::new(TestTransportFactory {
            transport: Arc::new(StaticTransport::new(CATALOG, Duration::ZERO)),
        }),
    });

    registry
        .ask(RegisterHost {
            config: host_config("mediapc"),
        })
        .await
        .unwrap();

    let err = registry
        .ask(RegisterHost {
            config: host_config("mediapc"),
        })
        .await
        .unwrap_err();
    assert!(err.to_string().contains("already exists"));

    registry.stop_gracefully().await.unwrap();
}

#[tokio::test]
async fn test_registry_unknown_host() {
    let (tx, _rx) = broadcast::channel(100);
    let registry = RegistryActor::spawn(RegistryActorArgs {
        event_tx: tx,
        transport_factory: Arc::new(TestTransportFactory {
            transport: Arc::new(StaticTransport::new(CATALOG, Duration::ZERO)),
        }),
    });

    let err = registry
        .ask(GetHostStatus {
            host: "ghost".to_string(),
        })
        .await
        .unwrap_err();
    assert!(err.to_string().contains("not found"));

    registry.stop_gracefully().await.unwrap();
}

#[tokio::test]
async fn test_registry_fetch_cache_invalidate_roundtrip() {
    let (tx, _rx) = broadcast::channel(100);
    let registry = RegistryActor::spawn(RegistryActorArgs {
        event_tx: tx,
        transport_factory: Arc::new(TestTransportFactory {
            transport: Arc::new(StaticTransport::new(CATALOG, Duration::ZERO)),
        }),
    });

    registry
        .ask(RegisterHost {
            config: host_config("mediapc"),
        })
        .await
        .unwrap();

    let handle = registry
        .ask(FetchHostCatalog {
            host: "mediapc".to_string(),
        })
        .await
        .unwrap();
    let snapshot = handle.outcome().await.unwrap();
    assert_eq!(snapshot.len(), 2);

    let cached = registry
        .ask(GetCachedCatalog {
            host: "mediapc".to_string(),
        })
        .await
        .unwrap();
    assert!(cached.snapshot.is_some());

    registry
        .ask(InvalidateCatalog {
            host: "mediapc".to_string(),
        })
        .await
        .unwrap();

    let cached = registry
        .ask(GetCachedCatalog {
            host: "mediapc".to_string(),
        })
        .await
        .unwrap();
    assert!(cached.snapshot.is_none());

    registry.stop_gracefully().await.unwrap();
}

#[tokio::test]
async fn test_registry_remove_host() {
    let (tx, _rx) = broadcast::channel(100);
    let registry = RegistryActor::spawn(RegistryActorArgs {
        event_tx: tx,
        transport_factory: Arc::new(TestTransportFactory {
            transport: Arc::new(StaticTransport::new(CATALOG, Duration::ZERO)),
        }),
    });

    registry
        .ask(RegisterHost {
            config: host_config("mediapc"),
        })
        .await
        .unwrap();
    registry
        .ask(UnregisterHost {
            host: "mediapc".to_string(),
        })
        .await
        .unwrap();

    let hosts = registry.ask(ListHosts).await.unwrap();
    assert!(hosts.is_empty());

    registry.stop_gracefully().await.unwrap();
}
