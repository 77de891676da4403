use crate::{AppState, Effect, FilterState, Favorites, Msg, RecentEntry};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::DatasetLoaded(jobs) => {
            state.set_jobs(jobs);
            Vec::new()
        }
        Msg::FiltersHydrated(filters) => {
            // The synced store already wrote the hydrated value; nothing to echo back.
            state.hydrate_filters(filters);
            Vec::new()
        }
        Msg::SearchChanged(text) => edit_filters(&mut state, |f| f.search = text),
        Msg::OnlyNewToggled(on) => edit_filters(&mut state, |f| f.only_new = on),
        Msg::OnlyFeaturedToggled(on) => edit_filters(&mut state, |f| f.only_featured = on),
        Msg::RoleSelected(role) => edit_filters(&mut state, |f| f.role = role),
        Msg::LevelSelected(level) => edit_filters(&mut state, |f| f.level = level),
        Msg::ContractSelected(contract) => edit_filters(&mut state, |f| f.contract = contract),
        Msg::TagClicked(tag) => edit_filters(&mut state, |f| {
            f.add_tag(tag);
        }),
        Msg::TagRemoved(tag) => edit_filters(&mut state, |f| {
            f.remove_tag(&tag);
        }),
        Msg::TagsReplaced(tags) => edit_filters(&mut state, |f| f.set_tags(tags)),
        Msg::SortSelected(key) => edit_filters(&mut state, |f| f.sort_by = key),
        Msg::ResetFilters => edit_filters(&mut state, |f| *f = FilterState::default()),
        Msg::FavoritesRestored(ids) => {
            *state.favorites_mut() = Favorites::from_ids(ids);
            Vec::new()
        }
        Msg::FavoriteToggled(id) => {
            state.favorites_mut().toggle(id);
            vec![Effect::PersistFavorites(state.favorite_ids())]
        }
        Msg::FavoritesCleared => {
            if state.favorites_mut().clear() {
                vec![Effect::PersistFavorites(Vec::new())]
            } else {
                Vec::new()
            }
        }
        Msg::FavoritesPanelToggled => {
            state.toggle_favorites_panel();
            Vec::new()
        }
        Msg::RecentRestored(items) => {
            state.restore_recent(items);
            Vec::new()
        }
        Msg::RecentSelected(index) => match state.recent().get(index) {
            Some(entry) => vec![Effect::Navigate {
                url: entry.url.clone(),
            }],
            None => Vec::new(),
        },
        Msg::RecentCleared => {
            if state.recent_mut().clear() {
                vec![Effect::PersistRecent(Vec::new())]
            } else {
                Vec::new()
            }
        }
        Msg::LocationChanged { href, at_ms } => {
            state.set_location(href.clone());
            let entry = RecentEntry {
                ts: at_ms,
                url: href,
                summary: state.filters().summary(),
            };
            if state.recent_mut().add(entry) {
                vec![Effect::PersistRecent(state.recent().items().to_vec())]
            } else {
                Vec::new()
            }
        }
        Msg::ThemeRestored(settings) => {
            *state.theme_mut() = settings;
            Vec::new()
        }
        Msg::ThemeModeSelected(mode) => {
            state.theme_mut().mode_pref = mode;
            vec![Effect::PersistTheme(state.theme())]
        }
        Msg::ThemeToggled => {
            state.theme_mut().toggle_mode();
            vec![Effect::PersistTheme(state.theme())]
        }
        Msg::AccentSelected(accent) => {
            state.theme_mut().accent = accent;
            vec![Effect::PersistTheme(state.theme())]
        }
        Msg::SystemThemeChanged { prefers_dark } => {
            state.set_system_prefers_dark(prefers_dark);
            Vec::new()
        }
        Msg::ShareLinkRequested => vec![Effect::CopyToClipboard {
            text: state.location().to_string(),
        }],
        Msg::ShareLinkCopied { ok } => {
            state.set_share_copied(ok);
            Vec::new()
        }
    };

    (state, effects)
}

fn edit_filters(state: &mut AppState, edit: impl FnOnce(&mut FilterState)) -> Vec<Effect> {
    match state.edit_filters(edit) {
        // Before hydration the URL and store still hold the authoritative value.
        Some(filters) if state.is_hydrated() => vec![Effect::SyncFilters(filters)],
        _ => Vec::new(),
    }
}
