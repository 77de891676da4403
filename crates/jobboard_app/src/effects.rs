use std::sync::mpsc;
use std::sync::Arc;

use jobboard_core::{Effect, FilterState, Msg};
use jobboard_engine::{PersistentState, Preferences};
use jobboard_logging::{board_debug, board_info, board_warn};

use crate::clipboard::Clipboard;

/// Carries out the effects `update` asks for. Results come back as messages.
pub struct EffectRunner {
    filters: PersistentState<FilterState>,
    prefs: Preferences,
    clipboard: Arc<dyn Clipboard>,
    msg_tx: mpsc::Sender<Msg>,
    navigate_to: Option<String>,
}

impl EffectRunner {
    pub fn new(
        filters: PersistentState<FilterState>,
        prefs: Preferences,
        clipboard: Arc<dyn Clipboard>,
        msg_tx: mpsc::Sender<Msg>,
    ) -> Self {
        Self {
            filters,
            prefs,
            clipboard,
            msg_tx,
            navigate_to: None,
        }
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SyncFilters(filters) => {
                    board_debug!("SyncFilters summary={}", filters.summary());
                    self.filters.set(filters);
                }
                Effect::PersistFavorites(ids) => self.prefs.save_favorites(&ids),
                Effect::PersistRecent(items) => self.prefs.save_recent(&items),
                Effect::PersistTheme(theme) => self.prefs.save_theme(&theme),
                Effect::CopyToClipboard { text } => {
                    let ok = match self.clipboard.copy(&text) {
                        Ok(method) => {
                            board_info!("Share link copied via {:?}", method);
                            true
                        }
                        Err(err) => {
                            board_warn!("Share link copy failed: {:#}", err);
                            false
                        }
                    };
                    let _ = self.msg_tx.send(Msg::ShareLinkCopied { ok });
                }
                Effect::Navigate { url } => {
                    board_info!("Navigate url={}", url);
                    self.navigate_to = Some(url);
                }
            }
        }
    }

    pub fn filters(&self) -> &PersistentState<FilterState> {
        &self.filters
    }

    pub fn take_navigation(&mut self) -> Option<String> {
        self.navigate_to.take()
    }
}
