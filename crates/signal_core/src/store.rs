use std::collections::HashMap;

use feed_logging::feed_warn;

use crate::{Signal, SignalId};

/// Result of replacing the collection. Duplicate ids are a data-quality
/// condition, not an error: lookups resolve to the last record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoadReport {
    pub loaded: usize,
    pub duplicate_ids: Vec<SignalId>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.duplicate_ids.is_empty()
    }
}

/// Authoritative in-memory collection for the current session.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SignalStore {
    signals: Vec<Signal>,
    index: HashMap<SignalId, usize>,
}

impl SignalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole collection; there is no partial merge.
    pub fn load(&mut self, records: Vec<Signal>) -> LoadReport {
        let mut index = HashMap::with_capacity(records.len());
        let mut duplicate_ids = Vec::new();
        for (pos, signal) in records.iter().enumerate() {
            if index.insert(signal.id.clone(), pos).is_some() && !duplicate_ids.contains(&signal.id)
            {
                duplicate_ids.push(signal.id.clone());
            }
        }

        if !duplicate_ids.is_empty() {
            feed_warn!(
                "Loaded {} signals with {} duplicated id(s): {:?}",
                records.len(),
                duplicate_ids.len(),
                duplicate_ids
            );
        }

        self.signals = records;
        self.index = index;
        LoadReport {
            loaded: self.signals.len(),
            duplicate_ids,
        }
    }

    /// Every record in source order, duplicates included.
    pub fn all(&self) -> &[Signal] {
        &self.signals
    }

    pub fn get(&self, id: &SignalId) -> Option<&Signal> {
        self.index.get(id).map(|&pos| &self.signals[pos])
    }

    pub fn contains(&self, id: &SignalId) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }
}
