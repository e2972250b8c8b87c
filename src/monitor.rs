//! System appearance signal.
//!
//! Wraps a `watch` channel holding the live appearance. Readers borrow the
//! current value; subscribers are woken only when the value actually changes.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;

use crate::scheme::Appearance;

/// Cloneable; the signal closes when the last clone is dropped.
#[derive(Debug, Clone)]
pub struct SystemAppearanceMonitor {
    tx: Arc<watch::Sender<Appearance>>,
}

impl SystemAppearanceMonitor {
    #[must_use]
    pub fn new(initial: Appearance) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    #[must_use]
    pub fn current(&self) -> Appearance {
        *self.tx.borrow()
    }

    /// Record a new system appearance. Returns `true` if it changed.
    pub fn set(&self, appearance: Appearance) -> bool {
        let changed = self.tx.send_if_modified(|current| {
            if *current == appearance {
                return false;
            }
            *current = appearance;
            true
        });
        if changed {
            info!(%appearance, "monitor: system appearance changed");
        }
        changed
    }

    /// Receiver for the live appearance and its change notifications.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Appearance> {
        self.tx.subscribe()
    }
}

impl Default for SystemAppearanceMonitor {
    fn default() -> Self {
        Self::new(Appearance::default())
    }
}

#[cfg(test)]
#[path = "monitor_test.rs"]
mod tests;
