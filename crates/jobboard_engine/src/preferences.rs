use std::sync::Arc;

use jobboard_core::{JobId, RecentEntry, ThemeSettings};
use jobboard_logging::board_warn;

use crate::store::{keys, load_json, save_json};
use crate::KeyValueStore;

/// Typed access to the collections persisted next to the filters.
///
/// Each collection owns its own key, and a missing or corrupt value reads
/// as empty.
#[derive(Clone)]
pub struct Preferences {
    store: Arc<dyn KeyValueStore>,
}

impl Preferences {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    pub fn load_favorites(&self) -> Vec<JobId> {
        load_json(self.store.as_ref(), keys::FAVORITES).unwrap_or_default()
    }

    pub fn save_favorites(&self, ids: &[JobId]) {
        save_json(self.store.as_ref(), keys::FAVORITES, ids);
    }

    /// Stored entries, newest first, cut to `limit`.
    pub fn load_recent(&self, limit: usize) -> Vec<RecentEntry> {
        let mut items: Vec<RecentEntry> =
            load_json(self.store.as_ref(), keys::RECENT).unwrap_or_default();
        items.truncate(limit);
        items
    }

    pub fn save_recent(&self, items: &[RecentEntry]) {
        save_json(self.store.as_ref(), keys::RECENT, items);
    }

    pub fn load_theme(&self) -> ThemeSettings {
        let mode = self.read_raw(keys::THEME_MODE);
        let accent = self.read_raw(keys::ACCENT);
        ThemeSettings::from_stored(mode.as_deref(), accent.as_deref())
    }

    /// Mode and accent are stored as bare strings under separate keys.
    pub fn save_theme(&self, theme: &ThemeSettings) {
        self.write_raw(keys::THEME_MODE, theme.mode_pref.as_str());
        self.write_raw(keys::ACCENT, theme.accent.as_str());
    }

    fn read_raw(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(err) => {
                board_warn!("Failed to read `{}` from store: {}", key, err);
                None
            }
        }
    }

    fn write_raw(&self, key: &str, value: &str) {
        if let Err(err) = self.store.set(key, value) {
            board_warn!("Failed to write `{}` to store: {}", key, err);
        }
    }
}
