//! Per-site forced color scheme engine.
//!
//! ARCHITECTURE
//! ============
//! The crate keeps one forced appearance preference (`system`, `light`,
//! `dark`) per site, reflects it onto a document model, and reacts to
//! changes in the system appearance signal.
//!
//! Leaves first:
//! - `style`: idempotent injection of the fixed override stylesheet.
//! - `store`: async get/set/remove of one scheme per site key.
//! - `monitor`: the system appearance signal.
//! - `engine`: the state machine driving the three above.
//! - `handler`: the single task that owns the engine and serializes
//!   control requests and appearance changes behind hydration.

pub mod config;
pub mod document;
pub mod engine;
pub mod handler;
pub mod monitor;
pub mod protocol;
pub mod routes;
pub mod scheme;
pub mod state;
pub mod store;
pub mod style;
