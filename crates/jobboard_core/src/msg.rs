use crate::{Accent, FilterState, Job, JobId, ModePref, RecentEntry, SortKey, ThemeSettings};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// The static dataset finished loading.
    DatasetLoaded(Vec<Job>),
    /// Filters resolved from URL, store and defaults. Enables write-through.
    FiltersHydrated(FilterState),
    /// User edited the search box.
    SearchChanged(String),
    OnlyNewToggled(bool),
    OnlyFeaturedToggled(bool),
    /// Empty string selects "any".
    RoleSelected(String),
    LevelSelected(String),
    ContractSelected(String),
    /// Tag chip clicked on a job card; adds it when absent.
    TagClicked(String),
    TagRemoved(String),
    /// Tag picker replaced the whole selection.
    TagsReplaced(Vec<String>),
    SortSelected(SortKey),
    /// User clicked "Reset filters".
    ResetFilters,
    /// Restore favorites from the persistent store.
    FavoritesRestored(Vec<JobId>),
    FavoriteToggled(JobId),
    FavoritesCleared,
    FavoritesPanelToggled,
    /// Restore the recent-search log from the persistent store.
    RecentRestored(Vec<RecentEntry>),
    /// User picked an entry from the recent-search menu.
    RecentSelected(usize),
    RecentCleared,
    /// The page location was replaced; `at_ms` stamps the recent entry.
    LocationChanged { href: String, at_ms: i64 },
    ThemeRestored(ThemeSettings),
    ThemeModeSelected(ModePref),
    ThemeToggled,
    AccentSelected(Accent),
    /// System color-scheme signal changed.
    SystemThemeChanged { prefers_dark: bool },
    /// User clicked "Copy share link".
    ShareLinkRequested,
    /// Result of the clipboard write.
    ShareLinkCopied { ok: bool },
}
