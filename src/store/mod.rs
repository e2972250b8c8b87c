//! Persistence adapter for per-site scheme preferences.
//!
//! DESIGN
//! ======
//! Backends implement [`SchemeStore`], a raw string key-value port. The
//! [`Persistence`] adapter sits in front of an optional backend and owns the
//! contract the engine relies on:
//! - keys are namespaced by [`SiteKey`], one entry per site;
//! - only `light` / `dark` are ever stored; absence means `system`;
//! - a missing backend reads as empty and writes as no-ops.
//!
//! ERROR HANDLING
//! ==============
//! Backend failures, panics included, are logged and degraded to empty
//! reads / no-op writes. The engine never fails or blocks on storage.

pub mod file;
pub mod memory;

use std::fmt;
use std::sync::Arc;

use tokio::task::JoinError;
use tracing::{debug, warn};

use crate::scheme::Scheme;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Namespace prefix for stored keys.
pub const KEY_PREFIX: &str = "color-scheme-toggler::";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage encoding error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("storage backend task failed: {0}")]
    Task(#[from] JoinError),
}

// =============================================================================
// SITE KEY
// =============================================================================

/// Persistence key scoping a stored scheme to one site host.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SiteKey(String);

impl SiteKey {
    /// Derive the key from a page host name.
    #[must_use]
    pub fn from_host(host: &str) -> Self {
        let host = host.trim().trim_end_matches('.').to_ascii_lowercase();
        Self(format!("{KEY_PREFIX}{host}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SiteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// BACKEND PORT
// =============================================================================

/// Async key-value backend. Implementations only move strings.
#[async_trait::async_trait]
pub trait SchemeStore: Send + Sync {
    /// Read the raw value for `key`, `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the backend cannot be read.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the backend cannot be written.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete `key`. Deleting an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the backend cannot be written.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}

// =============================================================================
// ADAPTER
// =============================================================================

/// Scheme persistence in front of an optional backend.
#[derive(Clone, Default)]
pub struct Persistence {
    backend: Option<Arc<dyn SchemeStore>>,
}

impl Persistence {
    #[must_use]
    pub fn new(backend: Arc<dyn SchemeStore>) -> Self {
        Self { backend: Some(backend) }
    }

    /// Adapter with no backend: reads are empty, writes are no-ops.
    #[must_use]
    pub fn unavailable() -> Self {
        Self { backend: None }
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    /// Stored forced scheme for `key`. Never returns `System`.
    pub async fn get(&self, key: &SiteKey) -> Option<Scheme> {
        let backend = Arc::clone(self.backend.as_ref()?);
        let owned = key.as_str().to_owned();
        let joined = tokio::spawn(async move { backend.get(&owned).await }).await;
        let raw = match flatten(joined) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(error = %e, %key, "store: read failed; treating as empty");
                return None;
            }
        };
        match raw.parse::<Scheme>() {
            Ok(scheme @ (Scheme::Light | Scheme::Dark)) => Some(scheme),
            _ => {
                debug!(%key, value = %raw, "store: ignoring unexpected stored value");
                None
            }
        }
    }

    /// Store a forced scheme. `System` is stored as absence.
    pub async fn set(&self, key: &SiteKey, scheme: Scheme) {
        if scheme == Scheme::System {
            self.remove(key).await;
            return;
        }
        let Some(backend) = self.backend.as_ref().map(Arc::clone) else {
            return;
        };
        let owned = key.as_str().to_owned();
        let joined = tokio::spawn(async move { backend.set(&owned, scheme.as_str()).await }).await;
        if let Err(e) = flatten(joined) {
            warn!(error = %e, %key, %scheme, "store: write failed; preference not persisted");
        }
    }

    pub async fn remove(&self, key: &SiteKey) {
        let Some(backend) = self.backend.as_ref().map(Arc::clone) else {
            return;
        };
        let owned = key.as_str().to_owned();
        let joined = tokio::spawn(async move { backend.remove(&owned).await }).await;
        if let Err(e) = flatten(joined) {
            warn!(error = %e, %key, "store: delete failed; stale preference may remain");
        }
    }
}

/// Each backend call runs on its own task; a panic there joins as an error.
fn flatten<T>(joined: Result<Result<T, StoreError>, JoinError>) -> Result<T, StoreError> {
    joined?
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
