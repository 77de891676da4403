mod common;

use std::sync::Arc;

use jobboard_app::cli::{ListArgs, ThemeArgs};
use jobboard_core::{ModePref, RecentEntry};
use jobboard_engine::{keys, KeyValueStore, MemoryStore, Preferences};
use pretty_assertions::assert_eq;

use common::{board, board_with, init_logging, RecordingClipboard, FIXED_MS};

fn list_args() -> ListArgs {
    ListArgs::default()
}

#[tokio::test]
async fn list_applies_flags_and_records_the_visit() {
    init_logging();
    let store = Arc::new(MemoryStore::new());
    let board = board(store.clone());

    let lines = board
        .list(&ListArgs {
            role: Some("Frontend".to_string()),
            tags: vec!["React".to_string()],
            ..list_args()
        })
        .unwrap();

    assert_eq!(lines[0], "2 results for role:Frontend • tags:React");
    assert!(lines.iter().any(|line| line.contains("Account")));
    assert!(lines.iter().any(|line| line.contains("The Air Filter Company")));
    assert_eq!(
        lines.last().map(String::as_str),
        Some("Share: https://jobs.local/?role=Frontend&tag=React&sort=recent")
    );

    let recent = Preferences::new(store.clone()).load_recent(5);
    assert_eq!(
        recent,
        vec![RecentEntry {
            ts: FIXED_MS,
            url: "https://jobs.local/?role=Frontend&tag=React&sort=recent".to_string(),
            summary: "role:Frontend • tags:React".to_string(),
        }]
    );
    assert!(store.get(keys::FILTERS).unwrap().is_some());
}

#[tokio::test]
async fn next_visit_without_url_hydrates_from_the_store() {
    init_logging();
    let store = Arc::new(MemoryStore::new());
    let board = board(store.clone());
    board
        .list(&ListArgs {
            contract: Some("Part Time".to_string()),
            ..list_args()
        })
        .unwrap();

    let lines = board.list(&list_args()).unwrap();

    assert_eq!(lines[0], "3 results for contract:Part Time");
    assert_eq!(
        lines.last().map(String::as_str),
        Some("Share: https://jobs.local/?contract=Part+Time&sort=recent")
    );
    // Same page twice in a row is recorded once.
    assert_eq!(Preferences::new(store).load_recent(5).len(), 1);
}

#[tokio::test]
async fn url_fields_override_stored_ones() {
    init_logging();
    let store = Arc::new(MemoryStore::new());
    let board = board(store.clone());
    board
        .list(&ListArgs {
            role: Some("Frontend".to_string()),
            level: Some("Junior".to_string()),
            ..list_args()
        })
        .unwrap();

    let lines = board
        .list(&ListArgs {
            url: Some("https://jobs.local/?level=Senior".to_string()),
            ..list_args()
        })
        .unwrap();

    assert_eq!(lines[0], "1 result for role:Frontend • level:Senior");
    assert!(lines[2].contains("Photosnap"));
}

#[tokio::test]
async fn empty_result_shows_placeholder() {
    init_logging();
    let board = board(Arc::new(MemoryStore::new()));

    let lines = board
        .list(&ListArgs {
            search: Some("cobol".to_string()),
            ..list_args()
        })
        .unwrap();

    assert_eq!(lines[0], "0 results for q:“cobol”");
    assert!(lines.contains(&"No results found".to_string()));
}

#[tokio::test]
async fn reopening_a_recent_search_navigates_to_its_url() {
    init_logging();
    let store = Arc::new(MemoryStore::new());
    let board = board(store.clone());
    board
        .list(&ListArgs {
            role: Some("Frontend".to_string()),
            ..list_args()
        })
        .unwrap();
    board
        .list(&ListArgs {
            reset: true,
            role: Some("Backend".to_string()),
            ..list_args()
        })
        .unwrap();

    let lines = board.recent(false, Some(2)).unwrap();

    assert_eq!(lines[0], "6 results for role:Frontend");
    let urls: Vec<String> = Preferences::new(store)
        .load_recent(5)
        .into_iter()
        .map(|entry| entry.url)
        .collect();
    assert_eq!(
        urls,
        vec![
            "https://jobs.local/?role=Frontend&sort=recent".to_string(),
            "https://jobs.local/?role=Backend&sort=recent".to_string(),
            "https://jobs.local/?role=Frontend&sort=recent".to_string(),
        ]
    );
}

#[tokio::test]
async fn recent_listing_and_bad_positions() {
    init_logging();
    let store = Arc::new(MemoryStore::new());
    let board = board(store.clone());

    assert_eq!(board.recent(false, None).unwrap(), vec!["No recent searches"]);
    board.list(&list_args()).unwrap();

    let lines = board.recent(false, None).unwrap();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("1. All jobs  (2023-11-14 22:13)"));
    assert!(board.recent(false, Some(0)).is_err());
    assert!(board.recent(false, Some(4)).is_err());

    assert_eq!(
        board.recent(true, None).unwrap(),
        vec!["Recent searches cleared"]
    );
    assert!(Preferences::new(store).load_recent(5).is_empty());
}

#[tokio::test]
async fn favorites_toggle_and_persist() {
    init_logging();
    let store = Arc::new(MemoryStore::new());
    let board = board(store.clone());

    let lines = board.toggle_favorite(3).unwrap();
    assert_eq!(lines[0], "Added Junior Frontend Developer · Account");
    assert_eq!(lines[1], "Favorites (1)");
    assert_eq!(Preferences::new(store.clone()).load_favorites(), vec![3]);

    let listing = board
        .list(&ListArgs {
            show_favorites: true,
            ..list_args()
        })
        .unwrap();
    assert!(listing.iter().any(|line| line.starts_with("★ #3")));
    assert!(listing.contains(&"Favorites (1)".to_string()));

    let lines = board.toggle_favorite(3).unwrap();
    assert_eq!(lines[0], "Removed Junior Frontend Developer · Account");
    assert!(Preferences::new(store).load_favorites().is_empty());

    assert!(board.toggle_favorite(99).is_err());
}

#[tokio::test]
async fn clearing_favorites_empties_the_panel() {
    init_logging();
    let store = Arc::new(MemoryStore::new());
    let board = board(store.clone());
    board.toggle_favorite(1).unwrap();
    board.toggle_favorite(5).unwrap();

    assert_eq!(
        board.favorites(false).unwrap(),
        vec![
            "Favorites (2)".to_string(),
            "  #1   Senior Frontend Developer · Photosnap".to_string(),
            "  #5   Software Engineer · Loop Studios".to_string(),
        ]
    );
    board.favorites(true).unwrap();
    assert_eq!(
        board.favorites(false).unwrap(),
        vec!["Favorites (0)".to_string(), "  No favorites yet".to_string()]
    );
}

#[tokio::test]
async fn share_copies_the_current_link() {
    init_logging();
    let clipboard = Arc::new(RecordingClipboard::default());
    let board = board_with(Arc::new(MemoryStore::new()), clipboard.clone());

    let lines = board.share(Some("https://jobs.local/?q=sass")).unwrap();

    assert_eq!(clipboard.copies(), vec!["https://jobs.local/?q=sass&sort=recent"]);
    assert_eq!(lines, vec!["Copied! https://jobs.local/?q=sass&sort=recent"]);
}

#[tokio::test]
async fn failed_copy_is_not_confirmed() {
    init_logging();
    let board = board_with(
        Arc::new(MemoryStore::new()),
        Arc::new(RecordingClipboard::failing()),
    );

    let lines = board.share(None).unwrap();
    assert_eq!(lines, vec!["Share link: https://jobs.local/?sort=recent"]);
}

#[tokio::test]
async fn theme_changes_persist_as_plain_strings() {
    init_logging();
    let store = Arc::new(MemoryStore::new());
    let board = board(store.clone());

    let lines = board
        .theme(&ThemeArgs {
            mode: Some(ModePref::Dark),
            ..ThemeArgs::default()
        })
        .unwrap();
    assert_eq!(lines[0], "Theme: dark (preference dark), accent tropical");
    assert_eq!(
        lines[1],
        "  accent #5CA5A5  background #0F1414  paper #151C1C  text #E6F1F1  muted #A9C0C0  chips rgba(92,165,165,0.16)"
    );
    assert_eq!(lines[2], "  toggle: Light mode");
    assert_eq!(store.get(keys::THEME_MODE).unwrap().as_deref(), Some("dark"));

    let lines = board
        .theme(&ThemeArgs {
            toggle: true,
            ..ThemeArgs::default()
        })
        .unwrap();
    assert_eq!(lines[0], "Theme: light (preference light), accent tropical");

    let lines = board
        .theme(&ThemeArgs {
            mode: Some(ModePref::System),
            system_dark: true,
            ..ThemeArgs::default()
        })
        .unwrap();
    assert_eq!(lines[0], "Theme: dark (preference system), accent tropical");
}

#[tokio::test]
async fn options_list_distinct_sorted_values() {
    init_logging();
    let board = board(Arc::new(MemoryStore::new()));

    let lines = board.options().unwrap();
    assert_eq!(lines[0], "Roles     Backend, Frontend, Fullstack");
    assert_eq!(lines[1], "Levels    Junior, Midweight, Senior");
    assert_eq!(lines[2], "Contracts Contract, Full Time, Part Time");
    assert!(lines[3].starts_with("Tags      CSS, Django, HTML, JavaScript"));
}
