//! Control protocol handler: the task that owns the engine.
//!
//! DESIGN
//! ======
//! One spawned task owns the [`Engine`] and is its only caller. It feeds
//! from two inbound channels:
//! - control commands (query / toggle / reset) over a bounded `mpsc` queue;
//! - system appearance changes from the monitor's `watch` channel.
//!
//! Both are drained by the same `select!` loop, so every mutation of the
//! document is serialized. After each event the task publishes the
//! document [`Reflection`] on a `watch` channel.
//!
//! LIFECYCLE
//! =========
//! 1. Spawn → hydrate once from persistence.
//! 2. Flip the readiness signal. Every [`EngineHandle`] request awaits it,
//!    so concurrent early requests all wait on the same hydration.
//! 3. Serve commands and appearance changes until every handle is dropped.
//!
//! ERROR HANDLING
//! ==============
//! Callers always get a scheme back. Storage failures never reach this
//! task (see [`crate::store::Persistence`]). If the engine task is gone the
//! handle answers with the last published reflection.

use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info, warn};

use crate::document::Reflection;
use crate::engine::Engine;
use crate::monitor::SystemAppearanceMonitor;
use crate::protocol::{ControlAction, SchemeResponse};
use crate::scheme::Scheme;

pub const DEFAULT_COMMAND_QUEUE_CAPACITY: usize = 64;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("engine task is unavailable")]
    Unavailable,
}

struct Command {
    action: ControlAction,
    reply: oneshot::Sender<Scheme>,
}

// =============================================================================
// HANDLE
// =============================================================================

/// Cloneable entry point for control requests.
#[derive(Clone)]
pub struct EngineHandle {
    tx: mpsc::Sender<Command>,
    ready: watch::Receiver<bool>,
    reflection: watch::Receiver<Reflection>,
}

impl EngineHandle {
    /// Wait until hydration has completed.
    ///
    /// # Errors
    ///
    /// [`EngineError::Unavailable`] if the engine task ended before hydrating.
    pub async fn ready(&self) -> Result<(), EngineError> {
        let mut ready = self.ready.clone();
        ready
            .wait_for(|hydrated| *hydrated)
            .await
            .map(|_| ())
            .map_err(|_| EngineError::Unavailable)
    }

    /// Run one action on the engine after hydration.
    ///
    /// # Errors
    ///
    /// [`EngineError::Unavailable`] if the engine task is gone or dropped the
    /// request before answering.
    pub async fn request(&self, action: ControlAction) -> Result<Scheme, EngineError> {
        self.ready().await?;
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Command { action, reply })
            .await
            .map_err(|_| EngineError::Unavailable)?;
        rx.await.map_err(|_| EngineError::Unavailable)
    }

    /// Answer a control request. Never fails: falls back to the last
    /// reflected scheme so the caller can resynchronize.
    pub async fn handle(&self, action: ControlAction) -> SchemeResponse {
        match self.request(action).await {
            Ok(scheme) => SchemeResponse { scheme },
            Err(e) => {
                let scheme = self.current_scheme();
                warn!(error = %e, action = action.as_str(), %scheme, "handler: answering with last reflection");
                SchemeResponse { scheme }
            }
        }
    }

    pub async fn query(&self) -> Scheme {
        self.handle(ControlAction::GetColorScheme).await.scheme
    }

    pub async fn toggle(&self) -> Scheme {
        self.handle(ControlAction::ToggleColorScheme).await.scheme
    }

    pub async fn reset(&self) -> Scheme {
        self.handle(ControlAction::ResetColorScheme).await.scheme
    }

    /// Scheme from the last published reflection. Does not wait.
    #[must_use]
    pub fn current_scheme(&self) -> Scheme {
        self.reflection.borrow().scheme
    }

    #[must_use]
    pub fn reflection(&self) -> Reflection {
        *self.reflection.borrow()
    }

    /// Receiver woken on every published reflection.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Reflection> {
        self.reflection.clone()
    }
}

// =============================================================================
// TASK
// =============================================================================

/// Spawn the engine task and return a handle to it.
///
/// Must be called from within a Tokio runtime.
#[must_use]
pub fn spawn_engine(mut engine: Engine, monitor: &SystemAppearanceMonitor, capacity: usize) -> EngineHandle {
    let (tx, mut rx) = mpsc::channel::<Command>(capacity.max(1));
    let (ready_tx, ready_rx) = watch::channel(false);
    let (reflection_tx, reflection_rx) = watch::channel(engine.reflection());
    // Subscribed before hydration so a change during hydration still wakes
    // the loop; resyncing the invert marker is idempotent.
    let mut changes = monitor.subscribe();

    tokio::spawn(async move {
        let scheme = engine.hydrate().await;
        reflection_tx.send_replace(engine.reflection());
        ready_tx.send_replace(true);
        info!(site = %engine.site_key(), %scheme, "handler: engine ready");

        let mut appearance_open = true;
        loop {
            tokio::select! {
                maybe_cmd = rx.recv() => {
                    let Some(cmd) = maybe_cmd else { break };
                    let scheme = match cmd.action {
                        ControlAction::GetColorScheme => engine.current_scheme(),
                        ControlAction::ToggleColorScheme => engine.toggle().await,
                        ControlAction::ResetColorScheme => engine.reset().await,
                    };
                    reflection_tx.send_replace(engine.reflection());
                    debug!(action = cmd.action.as_str(), %scheme, "handler: request served");
                    // EDGE: the caller may have stopped waiting; the transition stands.
                    let _ = cmd.reply.send(scheme);
                }
                changed = changes.changed(), if appearance_open => {
                    if changed.is_err() {
                        debug!("handler: appearance monitor dropped");
                        appearance_open = false;
                        continue;
                    }
                    engine.on_system_appearance_change();
                    reflection_tx.send_replace(engine.reflection());
                }
            }
        }
        info!(site = %engine.site_key(), "handler: engine stopped");
    });

    EngineHandle { tx, ready: ready_rx, reflection: reflection_rx }
}

#[cfg(test)]
#[path = "handler_test.rs"]
mod tests;
