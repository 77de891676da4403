use crate::view_model::{BoardViewModel, FavoriteRowView, JobRowView, ThemeView};
use crate::{
    evaluate, Favorites, FilterOptions, FilterState, Job, JobId, RecentEntry, RecentLog,
    ThemeSettings,
};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    jobs: Vec<Job>,
    options: FilterOptions,
    filters: FilterState,
    hydrated: bool,
    favorites: Favorites,
    show_favorites: bool,
    recent: RecentLog,
    theme: ThemeSettings,
    system_prefers_dark: bool,
    location: String,
    share_copied: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_recent_limit(limit: usize) -> Self {
        Self {
            recent: RecentLog::new(limit),
            ..Self::default()
        }
    }

    pub fn view(&self) -> BoardViewModel {
        let jobs: Vec<JobRowView> = evaluate(&self.jobs, &self.filters)
            .into_iter()
            .map(|job| JobRowView::from_job(job, self.favorites.contains(job.id)))
            .collect();
        let result_label = match jobs.len() {
            1 => "1 result".to_string(),
            n => format!("{n} results"),
        };
        let favorite_jobs = self
            .jobs
            .iter()
            .filter(|job| self.favorites.contains(job.id))
            .map(|job| FavoriteRowView {
                id: job.id,
                label: format!("{} · {}", job.position, job.company),
            })
            .collect();
        let effective = self.theme.effective_mode(self.system_prefers_dark);

        BoardViewModel {
            result_label,
            jobs,
            options: self.options.clone(),
            filters: self.filters.clone(),
            favorites_count: self.favorites.len(),
            show_favorites: self.show_favorites,
            favorite_jobs,
            recent: self.recent.items().to_vec(),
            theme: ThemeView {
                mode_pref: self.theme.mode_pref,
                accent: self.theme.accent,
                effective,
                palette: self.theme.palette(self.system_prefers_dark),
            },
            share_link: self.location.clone(),
            share_copied: self.share_copied,
        }
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    pub fn recent(&self) -> &RecentLog {
        &self.recent
    }

    pub fn theme(&self) -> ThemeSettings {
        self.theme
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    pub(crate) fn set_jobs(&mut self, jobs: Vec<Job>) {
        self.options = FilterOptions::from_jobs(&jobs);
        self.jobs = jobs;
    }

    pub(crate) fn hydrate_filters(&mut self, filters: FilterState) {
        self.filters = filters;
        self.hydrated = true;
    }

    /// Applies `edit` to the filters. Returns the new filters if anything changed.
    pub(crate) fn edit_filters(&mut self, edit: impl FnOnce(&mut FilterState)) -> Option<FilterState> {
        let before = self.filters.clone();
        edit(&mut self.filters);
        if self.filters == before {
            return None;
        }
        self.share_copied = false;
        Some(self.filters.clone())
    }

    pub(crate) fn favorites_mut(&mut self) -> &mut Favorites {
        &mut self.favorites
    }

    pub(crate) fn favorite_ids(&self) -> Vec<JobId> {
        self.favorites.ids().collect()
    }

    pub(crate) fn toggle_favorites_panel(&mut self) {
        self.show_favorites = !self.show_favorites;
    }

    pub(crate) fn restore_recent(&mut self, items: Vec<RecentEntry>) {
        self.recent = RecentLog::with_items(self.recent.limit(), items);
    }

    pub(crate) fn recent_mut(&mut self) -> &mut RecentLog {
        &mut self.recent
    }

    pub(crate) fn set_location(&mut self, href: String) {
        if self.location != href {
            self.location = href;
            self.share_copied = false;
        }
    }

    pub(crate) fn theme_mut(&mut self) -> &mut ThemeSettings {
        &mut self.theme
    }

    pub(crate) fn set_system_prefers_dark(&mut self, prefers_dark: bool) {
        self.system_prefers_dark = prefers_dark;
    }

    pub(crate) fn set_share_copied(&mut self, copied: bool) {
        self.share_copied = copied;
    }
}
