//! Control protocol messages.
//!
//! Requests are JSON objects with an `action` field; every answered request
//! gets `{ "scheme": ... }`. Anything that fails to parse is a
//! [`RequestError`], which the transport turns into "no response".

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::scheme::Scheme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ControlAction {
    GetColorScheme,
    ToggleColorScheme,
    ResetColorScheme,
}

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("request is not valid json: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("request has no action")]
    MissingAction,
    #[error("unknown action: {0}")]
    UnknownAction(String),
}

/// Response to every answered request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeResponse {
    pub scheme: Scheme,
}

impl ControlAction {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GetColorScheme => "getColorScheme",
            Self::ToggleColorScheme => "toggleColorScheme",
            Self::ResetColorScheme => "resetColorScheme",
        }
    }

    /// Parse a request from a JSON value.
    ///
    /// # Errors
    ///
    /// [`RequestError::MissingAction`] when `action` is absent, empty, or not
    /// a string; [`RequestError::UnknownAction`] for unrecognized names.
    pub fn from_request(request: &Value) -> Result<Self, RequestError> {
        let action = request
            .get("action")
            .and_then(Value::as_str)
            .filter(|a| !a.is_empty())
            .ok_or(RequestError::MissingAction)?;
        match action {
            "getColorScheme" => Ok(Self::GetColorScheme),
            "toggleColorScheme" => Ok(Self::ToggleColorScheme),
            "resetColorScheme" => Ok(Self::ResetColorScheme),
            other => Err(RequestError::UnknownAction(other.to_owned())),
        }
    }

    /// Parse a request from raw JSON bytes.
    ///
    /// # Errors
    ///
    /// [`RequestError::Malformed`] for invalid JSON, otherwise as
    /// [`ControlAction::from_request`].
    pub fn from_slice(bytes: &[u8]) -> Result<Self, RequestError> {
        let value: Value = serde_json::from_slice(bytes)?;
        Self::from_request(&value)
    }
}

#[cfg(test)]
#[path = "protocol_test.rs"]
mod tests;
