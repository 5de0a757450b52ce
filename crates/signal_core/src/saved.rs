use std::collections::BTreeSet;

use crate::{SignalId, SignalStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    Removed,
}

impl SaveOutcome {
    pub fn notice(self) -> &'static str {
        match self {
            SaveOutcome::Saved => "Signal saved to your list",
            SaveOutcome::Removed => "Signal removed from saved items",
        }
    }
}

/// Bookmarked signal ids.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SavedSet {
    ids: BTreeSet<SignalId>,
}

impl SavedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership and reports what happened. The outcome and the new
    /// membership come from the same read, so they can never disagree.
    pub fn toggle(&mut self, id: SignalId) -> SaveOutcome {
        if self.ids.remove(&id) {
            SaveOutcome::Removed
        } else {
            self.ids.insert(id);
            SaveOutcome::Saved
        }
    }

    pub fn contains(&self, id: &SignalId) -> bool {
        self.ids.contains(id)
    }

    /// Drops ids that are not part of the latest collection. Returns how many were pruned.
    pub fn retain_known(&mut self, store: &SignalStore) -> usize {
        let before = self.ids.len();
        self.ids.retain(|id| store.contains(id));
        before - self.ids.len()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SignalId> {
        self.ids.iter()
    }

    pub fn to_vec(&self) -> Vec<SignalId> {
        self.ids.iter().cloned().collect()
    }
}

impl FromIterator<SignalId> for SavedSet {
    fn from_iter<T: IntoIterator<Item = SignalId>>(iter: T) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}
