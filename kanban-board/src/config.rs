//! Configuration loading using Figment
//!
//! Sources, later ones override earlier ones:
//! 1. Built-in defaults
//! 2. A config file: an explicit path, or `kanban.toml` in the working directory
//! 3. Environment variables prefixed `KANBAN_` (e.g. `KANBAN_DATABASE`)

use crate::error::Result;
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// File looked up in the working directory when no explicit path is given
pub const DEFAULT_CONFIG_FILE: &str = "kanban.toml";

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "KANBAN_";

/// Runtime configuration for a kanban context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KanbanConfig {
    /// SQLite database file
    pub database: PathBuf,
    /// Acting user id. Authentication is stubbed; every operation runs as this user.
    pub actor: String,
    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,
    /// How long a writer waits on a locked database before failing with `Busy`
    pub busy_timeout_ms: u64,
    /// Buffer size of the board event channel
    pub event_capacity: usize,
}

impl Default for KanbanConfig {
    fn default() -> Self {
        Self {
            database: PathBuf::from("kanban.db"),
            actor: "local-user".to_string(),
            log_level: "warn".to_string(),
            busy_timeout_ms: 5000,
            event_capacity: 256,
        }
    }
}

impl KanbanConfig {
    /// Load from `kanban.toml` in the working directory (if present) and the environment
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load using an explicit config file when given.
    ///
    /// An explicit file must exist; the implicit `kanban.toml` is optional.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let figment = Self::figment(path)?;
        let config: Self = figment.extract()?;
        debug!(database = %config.database.display(), actor = %config.actor, "loaded configuration");
        Ok(config)
    }

    fn figment(path: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        format!("config file not found: {}", path.display()),
                    )
                    .into());
                }
                figment = figment.merge(Self::file_provider(path));
            }
            None => {
                figment = figment.merge(Toml::file(DEFAULT_CONFIG_FILE));
            }
        }

        Ok(figment.merge(Env::prefixed(ENV_PREFIX)))
    }

    fn file_provider(path: &Path) -> Figment {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Figment::from(Yaml::file(path)),
            Some("json") => Figment::from(Json::file(path)),
            _ => Figment::from(Toml::file(path)),
        }
    }
}
