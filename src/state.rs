//! Shared application state for the HTTP control surface.

use crate::config::ServiceConfig;
use crate::engine::Engine;
use crate::handler::{EngineHandle, spawn_engine};
use crate::monitor::SystemAppearanceMonitor;

/// Injected into Axum handlers via the `State` extractor. Both fields are
/// cheap handles onto the engine task and the appearance signal.
#[derive(Clone)]
pub struct AppState {
    pub engine: EngineHandle,
    pub monitor: SystemAppearanceMonitor,
}

impl AppState {
    #[must_use]
    pub fn new(engine: EngineHandle, monitor: SystemAppearanceMonitor) -> Self {
        Self { engine, monitor }
    }

    /// Build the monitor and engine from config and spawn the engine task.
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn from_config(config: &ServiceConfig) -> Self {
        let monitor = SystemAppearanceMonitor::new(config.system_appearance);
        let engine = Engine::new(config.site_key(), config.persistence(), monitor.subscribe());
        let handle = spawn_engine(engine, &monitor, config.command_queue_capacity);
        Self::new(handle, monitor)
    }
}

#[cfg(test)]
pub mod test_helpers {
    use std::sync::Arc;

    use super::*;
    use crate::scheme::Appearance;
    use crate::store::{MemoryStore, Persistence, SiteKey};

    pub const TEST_HOST: &str = "example.com";

    /// App state over an in-memory store, plus the store for inspection.
    #[must_use]
    pub fn test_app_state(system: Appearance) -> (AppState, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let monitor = SystemAppearanceMonitor::new(system);
        let engine = Engine::new(SiteKey::from_host(TEST_HOST), Persistence::new(store.clone()), monitor.subscribe());
        let handle = spawn_engine(engine, &monitor, crate::handler::DEFAULT_COMMAND_QUEUE_CAPACITY);
        (AppState::new(handle, monitor), store)
    }

    #[must_use]
    pub fn stored(store: &MemoryStore) -> Option<String> {
        store.entry(SiteKey::from_host(TEST_HOST).as_str())
    }
}
