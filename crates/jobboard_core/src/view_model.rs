use crate::{
    Accent, EffectiveMode, FilterOptions, FilterState, Job, JobId, ModePref, Palette, RecentEntry,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardViewModel {
    /// "1 result" / "N results".
    pub result_label: String,
    /// Filtered and sorted listing.
    pub jobs: Vec<JobRowView>,
    pub options: FilterOptions,
    pub filters: FilterState,
    pub favorites_count: usize,
    pub show_favorites: bool,
    /// Favorite jobs in dataset order.
    pub favorite_jobs: Vec<FavoriteRowView>,
    pub recent: Vec<RecentEntry>,
    pub theme: ThemeView,
    pub share_link: String,
    pub share_copied: bool,
}

impl BoardViewModel {
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn share_label(&self) -> &'static str {
        if self.share_copied {
            "Copied!"
        } else {
            "Copy share link"
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRowView {
    pub id: JobId,
    pub company: String,
    pub position: String,
    pub role: String,
    pub level: String,
    pub contract: String,
    pub location: String,
    pub posted_at: String,
    pub is_new: bool,
    pub is_featured: bool,
    /// Languages then tools.
    pub tags: Vec<String>,
    pub is_favorite: bool,
}

impl JobRowView {
    pub(crate) fn from_job(job: &Job, is_favorite: bool) -> Self {
        Self {
            id: job.id,
            company: job.company.clone(),
            position: job.position.clone(),
            role: job.role.clone(),
            level: job.level.clone(),
            contract: job.contract.clone(),
            location: job.location.clone(),
            posted_at: job.posted_at.clone(),
            is_new: job.is_new,
            is_featured: job.is_featured,
            tags: job.tags().map(ToOwned::to_owned).collect(),
            is_favorite,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteRowView {
    pub id: JobId,
    /// "Position · Company".
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeView {
    pub mode_pref: ModePref,
    pub accent: Accent,
    pub effective: EffectiveMode,
    pub palette: Palette,
}

impl ThemeView {
    /// Label of the light/dark toggle, naming the mode it switches to.
    pub fn toggle_label(&self) -> &'static str {
        match self.effective {
            EffectiveMode::Dark => "Light mode",
            EffectiveMode::Light => "Dark mode",
        }
    }
}
