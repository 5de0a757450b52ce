//! `dashboard.ron` loading.

use std::path::{Path, PathBuf};
use std::time::Duration;

use feed_logging::feed_info;
use serde::Deserialize;
use signal_core::{SignalCategory, ViewCatalog};
use thiserror::Error;

use crate::logging::LogDestination;

pub const DEFAULT_FIXTURE: &str = "fixtures/signals.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub backend: Option<BackendConfig>,
    pub fixture: Option<PathBuf>,
    /// Where saved ids are kept. `None` keeps them for the current run only.
    pub saved_path: Option<PathBuf>,
    pub log: LogDestination,
    pub log_level: String,
    pub load_timeout_secs: u64,
    pub views: Vec<ViewConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: None,
            fixture: None,
            saved_path: None,
            log: LogDestination::Terminal,
            log_level: "warn".to_string(),
            load_timeout_secs: 30,
            views: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BackendConfig {
    pub base_url: String,
    #[serde(default = "default_table")]
    pub table: String,
    /// Name of the environment variable holding the anon key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_table() -> String {
    "signals".to_string()
}

fn default_api_key_env() -> String {
    "SIGNALS_API_KEY".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ViewConfig {
    pub name: String,
    pub category: String,
}

impl AppConfig {
    /// Missing file means defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let config = Self::parse(&content).map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        })?;
        feed_info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self, String> {
        ron::from_str(content).map_err(|err| err.to_string())
    }

    /// Built-in views plus the configured ones.
    pub fn catalog(&self) -> ViewCatalog {
        let mut catalog = ViewCatalog::default();
        for view in &self.views {
            catalog.register(view.name.clone(), SignalCategory::from_key(&view.category));
        }
        catalog
    }

    pub fn load_timeout(&self) -> Duration {
        Duration::from_secs(self.load_timeout_secs.max(1))
    }
}
