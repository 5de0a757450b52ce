//! Persistence hook for bookmarked signals.
//!
//! The dashboard core never decides whether saved ids outlive a session.
//! The binary picks an implementation: [`InMemorySavedStore`] keeps them for
//! the process lifetime, [`RonSavedStore`] writes them to disk.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use feed_logging::{feed_error, feed_info};
use serde::{Deserialize, Serialize};
use signal_core::SignalId;

use crate::persist::{write_atomically, PersistError};

pub trait SavedSignalStore: Send + Sync {
    fn load(&self) -> Result<Vec<SignalId>, PersistError>;
    fn save(&self, ids: &[SignalId]) -> Result<(), PersistError>;
}

#[derive(Debug, Default)]
pub struct InMemorySavedStore {
    ids: Mutex<Vec<SignalId>>,
}

impl InMemorySavedStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(err: std::sync::PoisonError<T>) -> PersistError {
    feed_error!("In-memory saved store lock poisoned: {}", err);
    PersistError::Unavailable(err.to_string())
}

impl SavedSignalStore for InMemorySavedStore {
    fn load(&self) -> Result<Vec<SignalId>, PersistError> {
        let ids = self.ids.lock().map_err(poisoned)?;
        Ok(ids.clone())
    }

    fn save(&self, ids: &[SignalId]) -> Result<(), PersistError> {
        let mut stored = self.ids.lock().map_err(poisoned)?;
        *stored = ids.to_vec();
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
enum PersistedId {
    Num(u64),
    Text(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PersistedSaved {
    saved: Vec<PersistedId>,
}

/// Saved ids in a RON file, replaced atomically on every save.
#[derive(Debug, Clone)]
pub struct RonSavedStore {
    path: PathBuf,
}

impl RonSavedStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SavedSignalStore for RonSavedStore {
    fn load(&self) -> Result<Vec<SignalId>, PersistError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let state: PersistedSaved =
            ron::from_str(&content).map_err(|err| PersistError::Parse(err.to_string()))?;
        let ids: Vec<SignalId> = state
            .saved
            .into_iter()
            .map(|id| match id {
                PersistedId::Num(n) => SignalId::Num(n),
                PersistedId::Text(s) => SignalId::Text(s),
            })
            .collect();

        feed_info!("Loaded {} saved signal ids from {:?}", ids.len(), self.path);
        Ok(ids)
    }

    fn save(&self, ids: &[SignalId]) -> Result<(), PersistError> {
        let state = PersistedSaved {
            saved: ids
                .iter()
                .map(|id| match id {
                    SignalId::Num(n) => PersistedId::Num(*n),
                    SignalId::Text(s) => PersistedId::Text(s.clone()),
                })
                .collect(),
        };

        let pretty = ron::ser::PrettyConfig::new();
        let content = ron::ser::to_string_pretty(&state, pretty)
            .map_err(|err| PersistError::Serialize(err.to_string()))?;
        write_atomically(&self.path, &content)
    }
}
