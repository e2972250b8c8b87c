//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The HTTP surface is the host transport for control requests. A control
//! surface posts protocol messages, test harnesses read the document
//! reflection, and whatever observes the OS appearance pushes changes in.

pub mod control;

use axum::Router;
use axum::routing::{get, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/message", post(control::message))
        .route("/api/document", get(control::document))
        .route("/api/system-appearance", put(control::system_appearance))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}
