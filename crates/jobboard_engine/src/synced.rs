//! State mirrored into the page URL and the persistent store.
//!
//! Hydration runs once, when the value is created: URL values win over the
//! stored snapshot, which wins over the defaults. After that every change
//! re-arms a debounce timer; when it fires, the value current at that moment
//! is written to both the location and the store. Dropping the value cancels
//! a pending write.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use jobboard_core::{decode, encode, hydrate, UrlState};
use jobboard_logging::{board_debug, board_trace};
use serde_json::Value;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::store::{load_json, save_json};
use crate::{KeyValueStore, Location};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(250);

#[derive(Debug, Clone)]
pub struct SyncSettings {
    pub storage_key: String,
    pub debounce: Duration,
    /// Skip the store entirely; the URL is still kept in sync.
    pub disable_storage: bool,
}

impl SyncSettings {
    pub fn new(storage_key: impl Into<String>) -> Self {
        Self {
            storage_key: storage_key.into(),
            debounce: DEFAULT_DEBOUNCE,
            disable_storage: false,
        }
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }
}

struct Shared<S> {
    state: Mutex<S>,
    store: Arc<dyn KeyValueStore>,
    location: Arc<dyn Location>,
    settings: SyncSettings,
}

impl<S: UrlState> Shared<S> {
    fn current(&self) -> S {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Writes the value as it is now, not as it was when the write was scheduled.
    fn write_through(&self) {
        let state = self.current();
        let query = encode(&state, S::schema(), &self.location.query());
        let path = self.location.path();
        let url = if query.is_empty() {
            path
        } else {
            format!("{path}?{query}")
        };
        board_debug!("Syncing `{}` to {}", self.settings.storage_key, url);
        self.location.replace(&url);

        if !self.settings.disable_storage {
            save_json(self.store.as_ref(), &self.settings.storage_key, &state);
        }
    }
}

pub struct PersistentState<S> {
    shared: Arc<Shared<S>>,
    pending: Mutex<Option<JoinHandle<()>>>,
    runtime: Option<Handle>,
}

impl<S: UrlState + Send + 'static> PersistentState<S> {
    /// Hydrates from location, then store, then `defaults`, and schedules the
    /// first write-through.
    ///
    /// Outside a tokio runtime writes happen immediately instead of debounced.
    pub fn init(
        defaults: S,
        settings: SyncSettings,
        store: Arc<dyn KeyValueStore>,
        location: Arc<dyn Location>,
    ) -> Self {
        let from_url = decode(&location.query(), S::schema());
        let stored: Option<Value> = if settings.disable_storage {
            None
        } else {
            load_json(store.as_ref(), &settings.storage_key)
        };
        board_debug!(
            "Hydrating `{}`: {} url field(s), stored snapshot {}",
            settings.storage_key,
            from_url.len(),
            if stored.is_some() { "present" } else { "absent" }
        );
        let state = hydrate(&defaults, stored.as_ref(), &from_url);

        let this = Self {
            shared: Arc::new(Shared {
                state: Mutex::new(state),
                store,
                location,
                settings,
            }),
            pending: Mutex::new(None),
            runtime: Handle::try_current().ok(),
        };
        this.schedule();
        this
    }

    pub fn get(&self) -> S {
        self.shared.current()
    }

    pub fn set(&self, next: S) {
        {
            let mut state = self.shared.state.lock().unwrap_or_else(PoisonError::into_inner);
            *state = next;
        }
        self.schedule();
    }

    pub fn update(&self, edit: impl FnOnce(&mut S)) {
        {
            let mut state = self.shared.state.lock().unwrap_or_else(PoisonError::into_inner);
            edit(&mut *state);
        }
        self.schedule();
    }

    pub fn has_pending_write(&self) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }

    /// Performs a pending write now. No-op when nothing is pending.
    pub fn flush(&self) {
        let task = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(task) = task {
            if !task.is_finished() {
                task.abort();
                self.shared.write_through();
            }
        }
    }

    fn schedule(&self) {
        let Some(runtime) = &self.runtime else {
            self.shared.write_through();
            return;
        };

        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = pending.take() {
            board_trace!("Re-arming debounce for `{}`", self.shared.settings.storage_key);
            previous.abort();
        }
        let shared = Arc::clone(&self.shared);
        let delay = shared.settings.debounce;
        *pending = Some(runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            shared.write_through();
        }));
    }
}

impl<S> Drop for PersistentState<S> {
    fn drop(&mut self) {
        let pending = self
            .pending
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(task) = pending {
            task.abort();
        }
    }
}
