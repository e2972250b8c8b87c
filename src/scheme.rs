//! Scheme and appearance values plus the invert derivation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// User-chosen forced appearance. `System` means no override.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    #[default]
    System,
    Light,
    Dark,
}

/// Appearance reported by the operating system or browser.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Appearance {
    #[default]
    Light,
    Dark,
}

/// Returned when a string is not a known scheme or appearance name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct ParseError {
    kind: &'static str,
    value: String,
}

impl Scheme {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// The appearance this scheme forces, or `None` for `System`.
    #[must_use]
    pub fn forced_appearance(self) -> Option<Appearance> {
        match self {
            Self::System => None,
            Self::Light => Some(Appearance::Light),
            Self::Dark => Some(Appearance::Dark),
        }
    }

    /// Next scheme for a toggle. `Dark` goes to `Light`; everything else,
    /// including `System`, goes to `Dark` regardless of the live appearance.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light | Self::System => Self::Dark,
        }
    }
}

impl Appearance {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// Invert flag for a scheme under the given system appearance.
///
/// `None` when nothing is forced. Otherwise `true` exactly when the forced
/// appearance disagrees with the system one. Always call with the live
/// appearance; the result must not be cached across appearance changes.
#[must_use]
pub fn derive_invert(scheme: Scheme, system: Appearance) -> Option<bool> {
    scheme.forced_appearance().map(|forced| forced != system)
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Appearance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scheme {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "system" => Ok(Self::System),
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(ParseError { kind: "scheme", value: other.to_owned() }),
        }
    }
}

impl FromStr for Appearance {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(ParseError { kind: "appearance", value: other.to_owned() }),
        }
    }
}

#[cfg(test)]
#[path = "scheme_test.rs"]
mod tests;
