//! Signal source: loading signal collections and persisting saved ids.
mod engine;
mod fetch;
mod fixture;
mod persist;
pub mod rows;
mod saved_store;
mod types;

pub use engine::SourceHandle;
pub use fetch::{FetchSettings, RestSignalFetcher, SignalSource};
pub use fixture::{load_fixture, parse_fixture, FixtureError, FixtureSource};
pub use persist::{ensure_parent_dir, write_atomically, PersistError};
pub use rows::{normalize_row, normalize_rows, SignalRow};
pub use saved_store::{InMemorySavedStore, RonSavedStore, SavedSignalStore};
pub use types::{FailureKind, FetchError, RequestId, SourceEvent};
