use serde::{Deserialize, Serialize};

pub const DEFAULT_RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentEntry {
    /// Milliseconds since the Unix epoch.
    pub ts: i64,
    pub url: String,
    pub summary: String,
}

/// Most-recent-first log of visited searches, bounded to `limit` entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentLog {
    limit: usize,
    items: Vec<RecentEntry>,
}

impl Default for RecentLog {
    fn default() -> Self {
        Self::new(DEFAULT_RECENT_LIMIT)
    }
}

impl RecentLog {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            items: Vec::new(),
        }
    }

    /// Restores persisted entries, dropping anything past the bound.
    pub fn with_items(limit: usize, mut items: Vec<RecentEntry>) -> Self {
        items.truncate(limit);
        Self { limit, items }
    }

    /// Prepends `entry` unless the current head already has the same url.
    ///
    /// Only the head is compared; an older identical url is kept.
    pub fn add(&mut self, entry: RecentEntry) -> bool {
        if self.limit == 0 {
            return false;
        }
        if self.items.first().is_some_and(|head| head.url == entry.url) {
            return false;
        }
        self.items.insert(0, entry);
        self.items.truncate(self.limit);
        true
    }

    pub fn clear(&mut self) -> bool {
        let changed = !self.items.is_empty();
        self.items.clear();
        changed
    }

    pub fn items(&self) -> &[RecentEntry] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&RecentEntry> {
        self.items.get(index)
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
