use crate::{FilterState, JobId, RecentEntry, ThemeSettings};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Debounced write of the filters to the URL and the store.
    SyncFilters(FilterState),
    PersistFavorites(Vec<JobId>),
    PersistRecent(Vec<RecentEntry>),
    PersistTheme(ThemeSettings),
    CopyToClipboard { text: String },
    /// Open `url` as a new page (recent-search navigation).
    Navigate { url: String },
}
