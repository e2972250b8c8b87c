//! Service configuration parsed from environment variables.

use std::path::PathBuf;
use std::sync::Arc;

use crate::handler::DEFAULT_COMMAND_QUEUE_CAPACITY;
use crate::scheme::Appearance;
use crate::store::{FileStore, MemoryStore, Persistence, SiteKey};

pub const DEFAULT_SITE_HOST: &str = "localhost";
pub const DEFAULT_STORE_PATH: &str = "scheme-toggler.json";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}: {value}")]
    Invalid { var: &'static str, value: String },
}

/// Where scheme preferences are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    File(PathBuf),
    Memory,
    /// No backend; reads are empty and writes are dropped.
    None,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub site_host: String,
    pub store: StoreBackend,
    pub system_appearance: Appearance,
    pub port: u16,
    pub command_queue_capacity: usize,
}

impl ServiceConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `SITE_HOST`: default `localhost`
    /// - `STORE_BACKEND`: `file` (default), `memory`, or `none`
    /// - `STORE_PATH`: default `scheme-toggler.json`
    /// - `SYSTEM_APPEARANCE`: `light` (default) or `dark`
    /// - `PORT`: default 3000
    /// - `COMMAND_QUEUE_CAPACITY`: default 64
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for unknown backend or appearance
    /// names, an unparseable port, and an empty site host.
    pub fn from_env() -> Result<Self, ConfigError> {
        let site_host = std::env::var("SITE_HOST").unwrap_or_else(|_| DEFAULT_SITE_HOST.to_string());
        if site_host.trim().is_empty() {
            return Err(ConfigError::Invalid { var: "SITE_HOST", value: site_host });
        }
        let store_path = std::env::var("STORE_PATH").unwrap_or_else(|_| DEFAULT_STORE_PATH.to_string());
        let store = parse_backend(std::env::var("STORE_BACKEND").ok().as_deref(), store_path)?;
        let system_appearance = parse_appearance(std::env::var("SYSTEM_APPEARANCE").ok().as_deref())?;
        let port = parse_port(std::env::var("PORT").ok().as_deref())?;

        Ok(Self {
            site_host,
            store,
            system_appearance,
            port,
            command_queue_capacity: env_parse("COMMAND_QUEUE_CAPACITY", DEFAULT_COMMAND_QUEUE_CAPACITY),
        })
    }

    #[must_use]
    pub fn site_key(&self) -> SiteKey {
        SiteKey::from_host(&self.site_host)
    }

    /// Build the persistence adapter for the configured backend.
    #[must_use]
    pub fn persistence(&self) -> Persistence {
        match &self.store {
            StoreBackend::File(path) => Persistence::new(Arc::new(FileStore::new(path.clone()))),
            StoreBackend::Memory => Persistence::new(Arc::new(MemoryStore::new())),
            StoreBackend::None => Persistence::unavailable(),
        }
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

fn parse_backend(raw: Option<&str>, path: String) -> Result<StoreBackend, ConfigError> {
    match raw.unwrap_or("file") {
        "file" => Ok(StoreBackend::File(PathBuf::from(path))),
        "memory" => Ok(StoreBackend::Memory),
        "none" => Ok(StoreBackend::None),
        other => Err(ConfigError::Invalid { var: "STORE_BACKEND", value: other.to_owned() }),
    }
}

fn parse_appearance(raw: Option<&str>) -> Result<Appearance, ConfigError> {
    let raw = raw.unwrap_or("light");
    raw.parse()
        .map_err(|_| ConfigError::Invalid { var: "SYSTEM_APPEARANCE", value: raw.to_owned() })
}

fn parse_port(raw: Option<&str>) -> Result<u16, ConfigError> {
    let Some(raw) = raw else { return Ok(DEFAULT_PORT) };
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { var: "PORT", value: raw.to_owned() })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
