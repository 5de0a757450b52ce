use std::path::{Path, PathBuf};

use feed_logging::feed_info;
use signal_core::Signal;
use thiserror::Error;

use crate::{FailureKind, FetchError, SignalSource};

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("cannot read fixture {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid fixture json: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Parses a JSON array of signal records.
pub fn parse_fixture(text: &str) -> Result<Vec<Signal>, FixtureError> {
    Ok(serde_json::from_str(text)?)
}

pub fn load_fixture(path: &Path) -> Result<Vec<Signal>, FixtureError> {
    let text = std::fs::read_to_string(path).map_err(|source| FixtureError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let signals = parse_fixture(&text)?;
    feed_info!("Loaded {} fixture signals from {:?}", signals.len(), path);
    Ok(signals)
}

/// Static fixture file as a signal source.
#[derive(Debug, Clone)]
pub struct FixtureSource {
    path: PathBuf,
}

impl FixtureSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl SignalSource for FixtureSource {
    async fn load(&self) -> Result<Vec<Signal>, FetchError> {
        load_fixture(&self.path).map_err(|err| {
            let kind = match &err {
                FixtureError::Io { .. } => FailureKind::Io,
                FixtureError::Parse(_) => FailureKind::Decode,
            };
            FetchError::new(kind, err.to_string())
        })
    }
}
