//! Control protocol over HTTP.
//!
//! DESIGN
//! ======
//! `POST /api/message` carries one protocol request. Unrecognized or
//! malformed requests get `204 No Content`, the HTTP form of "no
//! response". Everything else is answered with `{ "scheme": ... }`.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use tracing::debug;

use crate::document::Reflection;
use crate::protocol::ControlAction;
use crate::scheme::Appearance;
use crate::state::AppState;

/// Body of `PUT /api/system-appearance`.
#[derive(Debug, Deserialize)]
pub struct AppearanceUpdate {
    pub appearance: Appearance,
}

/// `POST /api/message`
pub async fn message(State(state): State<AppState>, body: Bytes) -> Response {
    let action = match ControlAction::from_slice(&body) {
        Ok(action) => action,
        Err(e) => {
            debug!(error = %e, "control: ignoring request");
            return StatusCode::NO_CONTENT.into_response();
        }
    };
    Json(state.engine.handle(action).await).into_response()
}

/// `GET /api/document`
pub async fn document(State(state): State<AppState>) -> Json<Reflection> {
    Json(state.engine.reflection())
}

/// `PUT /api/system-appearance`
pub async fn system_appearance(State(state): State<AppState>, Json(update): Json<AppearanceUpdate>) -> StatusCode {
    let changed = state.monitor.set(update.appearance);
    debug!(appearance = %update.appearance, changed, "control: system appearance update");
    StatusCode::NO_CONTENT
}

#[cfg(test)]
#[path = "control_test.rs"]
mod tests;
