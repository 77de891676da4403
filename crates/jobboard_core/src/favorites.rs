use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::JobId;

/// Saved job ids. Serialized as a plain JSON array.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Favorites {
    ids: BTreeSet<JobId>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids(ids: impl IntoIterator<Item = JobId>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    /// Flips membership of `id`. Returns true if it is now a favorite.
    pub fn toggle(&mut self, id: JobId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    pub fn contains(&self, id: JobId) -> bool {
        self.ids.contains(&id)
    }

    pub fn clear(&mut self) -> bool {
        let changed = !self.ids.is_empty();
        self.ids.clear();
        changed
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = JobId> + '_ {
        self.ids.iter().copied()
    }
}
