//! Job board core: pure filter/sort logic, URL codec and the UI state machine.
mod codec;
mod effect;
mod evaluate;
mod favorites;
mod filters;
mod job;
mod msg;
mod recent;
mod state;
mod theme;
mod update;
mod view_model;

pub use codec::{
    decode, encode, hydrate, FieldDescriptor, FieldValue, PartialState, UrlState, ValueKind,
};
pub use effect::Effect;
pub use evaluate::{evaluate, FilterOptions};
pub use favorites::Favorites;
pub use filters::{summarize, FilterState, SortKey, FILTER_SCHEMA};
pub use job::{Job, JobId};
pub use msg::Msg;
pub use recent::{RecentEntry, RecentLog, DEFAULT_RECENT_LIMIT};
pub use state::AppState;
pub use theme::{Accent, EffectiveMode, ModePref, Palette, ThemeSettings};
pub use update::update;
pub use view_model::{BoardViewModel, FavoriteRowView, JobRowView, ThemeView};
