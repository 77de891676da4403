use std::collections::VecDeque;
use std::sync::{mpsc, Arc};

use anyhow::{bail, Context};
use chrono::Utc;
use jobboard_core::{update, AppState, BoardViewModel, FilterState, Job, JobId, Msg};
use jobboard_engine::{
    keys, FileStore, KeyValueStore, Location, MemoryLocation, PersistentState, Preferences,
    SyncSettings,
};
use jobboard_logging::{board_debug, board_info};

use crate::cli::{Cli, Command, ListArgs, ThemeArgs};
use crate::clipboard::{Clipboard, TerminalClipboard};
use crate::config::{load_config, BoardConfig};
use crate::dataset::{load_dataset, DatasetSource};
use crate::effects::EffectRunner;
use crate::{logging, render};

pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;
    logging::initialize(config.log_destination, config.log_level.into());
    board_info!("jobboard starting command={:?}", cli.command);

    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(&config.store_dir));
    let source = DatasetSource::from_config(config.dataset.as_deref());
    let jobs = load_dataset(&source, Arc::clone(&store), config.retry_policy()).await?;

    let board = Board {
        clipboard: Arc::new(TerminalClipboard::new(&config.store_dir)),
        config,
        store,
        jobs,
        clock: now_ms,
    };
    for line in board.execute(&cli.command)? {
        println!("{line}");
    }
    Ok(())
}

/// Everything a command needs; each command runs in its own [`Session`].
pub struct Board {
    pub config: BoardConfig,
    pub store: Arc<dyn KeyValueStore>,
    pub jobs: Vec<Job>,
    pub clipboard: Arc<dyn Clipboard>,
    /// Milliseconds since the Unix epoch, for recent-search stamps.
    pub clock: fn() -> i64,
}

impl Board {
    pub fn execute(&self, command: &Command) -> anyhow::Result<Vec<String>> {
        match command {
            Command::List(args) => self.list(args),
            Command::Favorite { id } => self.toggle_favorite(*id),
            Command::Favorites { clear } => self.favorites(*clear),
            Command::Recent { clear, open } => self.recent(*clear, *open),
            Command::Theme(args) => self.theme(args),
            Command::Share { url } => self.share(url.as_deref()),
            Command::Options => self.options(),
        }
    }

    /// Opens a page at `url`, or at the configured base address.
    pub fn session(&self, url: Option<&str>) -> anyhow::Result<Session> {
        let href = url.unwrap_or(&self.config.base_url);
        let location = Arc::new(
            MemoryLocation::parse(href).with_context(|| format!("invalid page url `{href}`"))?,
        );
        Ok(Session::open(
            &self.config,
            Arc::clone(&self.store),
            location,
            Arc::clone(&self.clipboard),
            self.jobs.clone(),
        ))
    }

    pub fn list(&self, args: &ListArgs) -> anyhow::Result<Vec<String>> {
        let mut session = self.session(args.url.as_deref())?;
        session.dispatch_all(args.messages());
        session.settle((self.clock)());

        let view = session.view();
        let mut lines = render::board(&view);
        lines.push(String::new());
        lines.push(format!("Share: {}", view.share_link));
        Ok(lines)
    }

    pub fn toggle_favorite(&self, id: JobId) -> anyhow::Result<Vec<String>> {
        let Some(job) = self.jobs.iter().find(|job| job.id == id) else {
            bail!("no job with id {id}");
        };
        let mut session = self.session(None)?;
        session.dispatch(Msg::FavoriteToggled(id));

        let view = session.view();
        let verb = if session.state().favorites().contains(id) {
            "Added"
        } else {
            "Removed"
        };
        let mut lines = vec![format!("{verb} {} · {}", job.position, job.company)];
        lines.extend(render::favorites(&view));
        Ok(lines)
    }

    pub fn favorites(&self, clear: bool) -> anyhow::Result<Vec<String>> {
        let mut session = self.session(None)?;
        if clear {
            session.dispatch(Msg::FavoritesCleared);
            return Ok(vec!["Favorites cleared".to_string()]);
        }
        Ok(render::favorites(&session.view()))
    }

    /// `open` is one-based, newest first.
    pub fn recent(&self, clear: bool, open: Option<usize>) -> anyhow::Result<Vec<String>> {
        let mut session = self.session(None)?;
        if clear {
            session.dispatch(Msg::RecentCleared);
            return Ok(vec!["Recent searches cleared".to_string()]);
        }
        let Some(position) = open else {
            return Ok(render::recent(session.state().recent().items()));
        };

        if let Some(index) = position.checked_sub(1) {
            session.dispatch(Msg::RecentSelected(index));
        }
        let Some(url) = session.take_navigation() else {
            bail!("no recent search #{position}");
        };
        drop(session);
        self.list(&ListArgs {
            url: Some(url),
            ..ListArgs::default()
        })
    }

    pub fn theme(&self, args: &ThemeArgs) -> anyhow::Result<Vec<String>> {
        let mut session = self.session(None)?;
        session.dispatch_all(args.messages());
        Ok(render::theme(&session.view().theme))
    }

    pub fn share(&self, url: Option<&str>) -> anyhow::Result<Vec<String>> {
        let mut session = self.session(url)?;
        session.settle((self.clock)());
        session.dispatch(Msg::ShareLinkRequested);
        Ok(render::share(&session.view()))
    }

    pub fn options(&self) -> anyhow::Result<Vec<String>> {
        let session = self.session(None)?;
        Ok(render::options(&session.view().options))
    }
}

/// One page visit: the UI state, its synced filters and the effect runner.
pub struct Session {
    state: AppState,
    runner: EffectRunner,
    msg_rx: mpsc::Receiver<Msg>,
    location: Arc<MemoryLocation>,
}

impl Session {
    pub fn open(
        config: &BoardConfig,
        store: Arc<dyn KeyValueStore>,
        location: Arc<MemoryLocation>,
        clipboard: Arc<dyn Clipboard>,
        jobs: Vec<Job>,
    ) -> Self {
        let prefs = Preferences::new(Arc::clone(&store));
        let filters = PersistentState::init(
            FilterState::default(),
            SyncSettings::new(keys::FILTERS).with_debounce(config.debounce()),
            store,
            location.clone(),
        );
        let hydrated = filters.get();
        let favorites = prefs.load_favorites();
        let recent = prefs.load_recent(config.recent_limit);
        let theme = prefs.load_theme();

        let (msg_tx, msg_rx) = mpsc::channel();
        let mut session = Self {
            state: AppState::with_recent_limit(config.recent_limit),
            runner: EffectRunner::new(filters, prefs, clipboard, msg_tx),
            msg_rx,
            location,
        };
        session.dispatch_all([
            Msg::DatasetLoaded(jobs),
            Msg::FavoritesRestored(favorites),
            Msg::RecentRestored(recent),
            Msg::ThemeRestored(theme),
            Msg::FiltersHydrated(hydrated),
        ]);
        session
    }

    /// Applies `msg` and every message its effects feed back.
    pub fn dispatch(&mut self, msg: Msg) {
        let mut inbox = VecDeque::from([msg]);
        while let Some(msg) = inbox.pop_front() {
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;
            self.runner.run(effects);
            inbox.extend(self.msg_rx.try_iter());
        }
    }

    pub fn dispatch_all(&mut self, msgs: impl IntoIterator<Item = Msg>) {
        for msg in msgs {
            self.dispatch(msg);
        }
    }

    /// Writes pending filter changes through and records the resulting page.
    pub fn settle(&mut self, at_ms: i64) {
        self.runner.filters().flush();
        let href = self.location.href();
        board_debug!("Settled at {}", href);
        self.dispatch(Msg::LocationChanged { href, at_ms });
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn view(&self) -> BoardViewModel {
        self.state.view()
    }

    pub fn location(&self) -> &MemoryLocation {
        &self.location
    }

    pub fn take_navigation(&mut self) -> Option<String> {
        self.runner.take_navigation()
    }
}
