use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::Semaphore;
use tokio::time::{Duration, timeout};

use super::*;
use crate::scheme::Appearance;
use crate::store::{MemoryStore, Persistence, SchemeStore, SiteKey, StoreError};

const HOST: &str = "example.com";

fn key() -> String {
    SiteKey::from_host(HOST).as_str().to_owned()
}

fn spawn_with(store: Arc<dyn SchemeStore>, monitor: &SystemAppearanceMonitor) -> EngineHandle {
    let engine = Engine::new(SiteKey::from_host(HOST), Persistence::new(store), monitor.subscribe());
    spawn_engine(engine, monitor, DEFAULT_COMMAND_QUEUE_CAPACITY)
}

/// Store whose reads block until the gate is opened.
struct GatedStore {
    inner: MemoryStore,
    gate: Semaphore,
    reads: AtomicUsize,
}

impl GatedStore {
    fn new() -> Self {
        Self { inner: MemoryStore::new(), gate: Semaphore::new(0), reads: AtomicUsize::new(0) }
    }

    fn open(&self) {
        self.gate.add_permits(64);
    }
}

#[async_trait::async_trait]
impl SchemeStore for GatedStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let _permit = self.gate.acquire().await.expect("gate semaphore open");
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.inner.remove(key).await
    }
}

/// Store whose writes panic.
struct ExplodingStore;

#[async_trait::async_trait]
impl SchemeStore for ExplodingStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        panic!("store exploded");
    }

    async fn remove(&self, _key: &str) -> Result<(), StoreError> {
        panic!("store exploded");
    }
}

// =============================================================================
// Readiness
// =============================================================================

#[tokio::test]
async fn requests_wait_for_hydration() {
    let store = Arc::new(GatedStore::new());
    store.inner.set(&key(), "light").await.unwrap();
    let monitor = SystemAppearanceMonitor::new(Appearance::Light);
    let handle = spawn_with(store.clone(), &monitor);

    assert!(timeout(Duration::from_millis(50), handle.ready()).await.is_err());

    let early = {
        let handle = handle.clone();
        tokio::spawn(async move { handle.query().await })
    };
    store.open();

    assert_eq!(early.await.unwrap(), Scheme::Light);
}

#[tokio::test]
async fn concurrent_early_requests_share_one_hydration() {
    let store = Arc::new(GatedStore::new());
    let monitor = SystemAppearanceMonitor::new(Appearance::Light);
    let handle = spawn_with(store.clone(), &monitor);

    let waiters: Vec<_> = (0..5)
        .map(|_| {
            let handle = handle.clone();
            tokio::spawn(async move { handle.query().await })
        })
        .collect();
    store.open();

    for waiter in waiters {
        assert_eq!(waiter.await.unwrap(), Scheme::System);
    }
    assert_eq!(store.reads.load(Ordering::SeqCst), 1);
}

// =============================================================================
// Requests
// =============================================================================

#[tokio::test]
async fn toggle_and_reset_round_trip_through_task() {
    let store = Arc::new(MemoryStore::new());
    let monitor = SystemAppearanceMonitor::new(Appearance::Light);
    let handle = spawn_with(store.clone(), &monitor);

    assert_eq!(handle.toggle().await, Scheme::Dark);
    assert_eq!(handle.toggle().await, Scheme::Light);
    assert_eq!(store.entry(&key()).as_deref(), Some("light"));

    assert_eq!(handle.reset().await, Scheme::System);
    assert_eq!(store.entry(&key()), None);
}

#[tokio::test]
async fn published_reflection_follows_requests() {
    let store = Arc::new(MemoryStore::new());
    let monitor = SystemAppearanceMonitor::new(Appearance::Light);
    let handle = spawn_with(store, &monitor);

    handle.toggle().await;

    let reflection = handle.reflection();
    assert_eq!(reflection.scheme, Scheme::Dark);
    assert_eq!(reflection.invert, Some(true));
    assert!(reflection.style_installed);
    assert_eq!(handle.current_scheme(), Scheme::Dark);
}

#[tokio::test]
async fn end_to_end_scenario() {
    let store = Arc::new(MemoryStore::new());
    let monitor = SystemAppearanceMonitor::new(Appearance::Light);
    let handle = spawn_with(store.clone(), &monitor);
    let mut reflections = handle.subscribe();

    assert_eq!(handle.handle(ControlAction::GetColorScheme).await.scheme, Scheme::System);

    assert_eq!(handle.handle(ControlAction::ToggleColorScheme).await.scheme, Scheme::Dark);
    assert_eq!(store.entry(&key()).as_deref(), Some("dark"));

    monitor.set(Appearance::Dark);
    timeout(Duration::from_secs(1), reflections.wait_for(|r| r.invert == Some(false)))
        .await
        .expect("invert resync timed out")
        .expect("engine alive");
    assert_eq!(store.entry(&key()).as_deref(), Some("dark"));

    assert_eq!(handle.handle(ControlAction::ResetColorScheme).await.scheme, Scheme::System);
    assert_eq!(store.entry(&key()), None);
    assert_eq!(handle.reflection().invert, None);
}

#[tokio::test]
async fn dropped_monitor_keeps_engine_serving() {
    let store = Arc::new(MemoryStore::new());
    let monitor = SystemAppearanceMonitor::new(Appearance::Light);
    let handle = spawn_with(store, &monitor);
    drop(monitor);

    assert_eq!(handle.toggle().await, Scheme::Dark);
    assert_eq!(handle.query().await, Scheme::Dark);
}

// =============================================================================
// Degraded storage
// =============================================================================

#[tokio::test]
async fn panicking_store_keeps_engine_serving() {
    let monitor = SystemAppearanceMonitor::new(Appearance::Light);
    let handle = spawn_with(Arc::new(ExplodingStore), &monitor);

    assert_eq!(handle.toggle().await, Scheme::Dark);
    assert_eq!(handle.toggle().await, Scheme::Light);
    assert_eq!(handle.reflection().invert, Some(false));

    assert_eq!(handle.request(ControlAction::GetColorScheme).await.ok(), Some(Scheme::Light));
    assert_eq!(handle.reset().await, Scheme::System);
    assert_eq!(handle.query().await, Scheme::System);
}
