mod common;

use std::sync::Arc;

use jobboard_core::{Accent, ModePref, RecentEntry, ThemeSettings};
use jobboard_engine::{keys, KeyValueStore, MemoryStore, Preferences};
use pretty_assertions::assert_eq;

use common::init_logging;

fn entry(ts: i64, query: &str) -> RecentEntry {
    RecentEntry {
        ts,
        url: format!("https://jobs.local/?{query}"),
        summary: query.to_string(),
    }
}

#[test]
fn favorites_round_trip() {
    init_logging();
    let prefs = Preferences::new(Arc::new(MemoryStore::new()));

    assert!(prefs.load_favorites().is_empty());
    prefs.save_favorites(&[3, 1]);
    assert_eq!(prefs.load_favorites(), vec![3, 1]);
}

#[test]
fn recent_entries_are_cut_to_the_limit() {
    init_logging();
    let prefs = Preferences::new(Arc::new(MemoryStore::new()));
    let items: Vec<RecentEntry> = (0..7).map(|i| entry(i, &format!("q={i}"))).collect();
    prefs.save_recent(&items);

    let loaded = prefs.load_recent(5);
    assert_eq!(loaded.len(), 5);
    assert_eq!(loaded[0], items[0]);
    assert_eq!(loaded[4], items[4]);
}

#[test]
fn theme_is_stored_as_two_plain_strings() {
    init_logging();
    let store = Arc::new(MemoryStore::new());
    let prefs = Preferences::new(store.clone());

    prefs.save_theme(&ThemeSettings {
        mode_pref: ModePref::Dark,
        accent: Accent::Neutral,
    });

    assert_eq!(store.get(keys::THEME_MODE).unwrap().as_deref(), Some("dark"));
    assert_eq!(store.get(keys::ACCENT).unwrap().as_deref(), Some("neutral"));
    assert_eq!(
        prefs.load_theme(),
        ThemeSettings {
            mode_pref: ModePref::Dark,
            accent: Accent::Neutral,
        }
    );
}

#[test]
fn unknown_theme_values_fall_back_to_defaults() {
    init_logging();
    let store = Arc::new(MemoryStore::new());
    store.set(keys::THEME_MODE, "purple").unwrap();
    store.set(keys::ACCENT, "neutral").unwrap();

    let theme = Preferences::new(store).load_theme();
    assert_eq!(theme.mode_pref, ModePref::System);
    assert_eq!(theme.accent, Accent::Neutral);
}

#[test]
fn unavailable_store_reads_as_empty() {
    init_logging();
    let prefs = Preferences::new(Arc::new(MemoryStore::unavailable()));

    prefs.save_favorites(&[1]);
    assert!(prefs.load_favorites().is_empty());
    assert!(prefs.load_recent(5).is_empty());
    assert_eq!(prefs.load_theme(), ThemeSettings::default());
}
