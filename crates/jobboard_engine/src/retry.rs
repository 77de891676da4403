//! Single-flight JSON loader with bounded retries and an optional cache.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use jobboard_logging::{board_debug, board_info, board_warn};
use rand::Rng;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::{AbortHandle, JoinHandle};
use tokio_util::sync::CancellationToken;

use crate::store::{load_json, save_json};
use crate::{FailureKind, FetchError, Fetcher, KeyValueStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts after the first one.
    pub retries: u32,
    pub backoff_base: Duration,
    /// Upper bound (exclusive) of the random delay added to each backoff.
    pub max_jitter: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 3,
            backoff_base: Duration::from_millis(400),
            max_jitter: Duration::from_millis(120),
        }
    }
}

impl RetryPolicy {
    pub fn max_attempts(&self) -> u32 {
        self.retries.saturating_add(1)
    }

    /// Wait after the failed attempt with zero-based index `attempt`.
    pub fn backoff(&self, attempt: u32, jitter: Duration) -> Duration {
        let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
        self.backoff_base
            .checked_mul(factor)
            .unwrap_or(Duration::MAX)
            .saturating_add(jitter)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetryPhase {
    #[default]
    Idle,
    /// One-based attempt number.
    Attempting(u32),
    /// Waiting after the given failed attempt.
    BackoffWaiting(u32),
    Done,
    Failed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadError {
    #[error("request aborted")]
    Aborted,
    #[error("gave up after {attempts} attempt(s): {last}")]
    Exhausted { attempts: u32, last: FetchError },
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadState<T> {
    /// Last good payload, from the cache or a successful attempt.
    pub data: Option<T>,
    pub error: Option<LoadError>,
    pub is_loading: bool,
    pub phase: RetryPhase,
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            is_loading: false,
            phase: RetryPhase::Idle,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    pub policy: RetryPolicy,
    pub cache_key: Option<String>,
}

impl LoadOptions {
    pub fn with_cache_key(mut self, key: impl Into<String>) -> Self {
        self.cache_key = Some(key.into());
        self
    }
}

/// Maps the jitter bound to the delay actually added.
pub type JitterFn = Arc<dyn Fn(Duration) -> Duration + Send + Sync>;

pub fn full_jitter() -> JitterFn {
    Arc::new(|max: Duration| {
        let max_ms = u64::try_from(max.as_millis()).unwrap_or(u64::MAX);
        if max_ms == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rand::rng().random_range(0..max_ms))
    })
}

struct Inner<T> {
    fetcher: Arc<dyn Fetcher>,
    store: Arc<dyn KeyValueStore>,
    jitter: JitterFn,
    state: watch::Sender<LoadState<T>>,
    generation: AtomicU64,
}

impl<T> Inner<T> {
    /// Applies `edit` unless a newer load (or a cancel) has started since `generation`.
    fn publish(&self, generation: u64, edit: impl FnOnce(&mut LoadState<T>)) -> bool {
        self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            edit(state);
            true
        })
    }
}

struct Flight {
    token: CancellationToken,
    task: AbortHandle,
}

impl Flight {
    fn stop(self) {
        self.token.cancel();
        self.task.abort();
    }
}

/// Loads a JSON payload of type `T`, keeping the last good value on failure.
///
/// Each `load` supersedes the previous one: its in-flight request is
/// cancelled and anything it produces afterwards is discarded.
pub struct RetryingFetch<T> {
    inner: Arc<Inner<T>>,
    current: Mutex<Option<Flight>>,
}

impl<T> RetryingFetch<T>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
{
    pub fn new(fetcher: Arc<dyn Fetcher>, store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_jitter(fetcher, store, full_jitter())
    }

    pub fn with_jitter(
        fetcher: Arc<dyn Fetcher>,
        store: Arc<dyn KeyValueStore>,
        jitter: JitterFn,
    ) -> Self {
        let (state, _) = watch::channel(LoadState::default());
        Self {
            inner: Arc::new(Inner {
                fetcher,
                store,
                jitter,
                state,
                generation: AtomicU64::new(0),
            }),
            current: Mutex::new(None),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<LoadState<T>> {
        self.inner.state.subscribe()
    }

    pub fn state(&self) -> LoadState<T> {
        self.inner.state.borrow().clone()
    }

    /// Starts a new load on the current tokio runtime.
    ///
    /// A cached value, when present, is published before this returns.
    pub fn load(&self, url: &str, options: LoadOptions) -> JoinHandle<()> {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(previous) = current.take() {
            board_debug!("Superseding previous load");
            previous.stop();
        }

        let cached: Option<T> = options
            .cache_key
            .as_deref()
            .and_then(|key| load_json(self.inner.store.as_ref(), key));
        self.inner.publish(generation, |state| {
            if let Some(value) = cached {
                state.data = Some(value);
            }
            state.error = None;
            state.is_loading = true;
            state.phase = RetryPhase::Idle;
        });

        let token = CancellationToken::new();
        let task = tokio::spawn(run(
            Arc::clone(&self.inner),
            url.to_string(),
            options,
            token.clone(),
            generation,
        ));
        *current = Some(Flight {
            token,
            task: task.abort_handle(),
        });
        task
    }

    /// Aborts the in-flight load, surfacing [`LoadError::Aborted`].
    pub fn cancel(&self) {
        let flight = self
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        let Some(flight) = flight else {
            return;
        };
        self.inner.generation.fetch_add(1, Ordering::SeqCst);
        flight.stop();
        self.inner.state.send_if_modified(|state| {
            if !state.is_loading {
                return false;
            }
            state.error = Some(LoadError::Aborted);
            state.is_loading = false;
            state.phase = RetryPhase::Cancelled;
            true
        });
        board_info!("Load aborted");
    }
}

impl<T> Drop for RetryingFetch<T> {
    fn drop(&mut self) {
        self.inner.generation.fetch_add(1, Ordering::SeqCst);
        let flight = self
            .current
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(flight) = flight {
            flight.stop();
        }
    }
}

async fn run<T>(
    inner: Arc<Inner<T>>,
    url: String,
    options: LoadOptions,
    token: CancellationToken,
    generation: u64,
) where
    T: Serialize + DeserializeOwned,
{
    let policy = options.policy;
    let max_attempts = policy.max_attempts();
    let mut attempt: u32 = 0;

    loop {
        inner.publish(generation, |state| {
            state.phase = RetryPhase::Attempting(attempt + 1)
        });
        let outcome = tokio::select! {
            _ = token.cancelled() => return,
            outcome = inner.fetcher.fetch(&url) => outcome,
        };
        let decoded = outcome.and_then(|output| {
            serde_json::from_slice::<T>(&output.bytes)
                .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))
        });

        let err = match decoded {
            Ok(value) => {
                if let Some(key) = options.cache_key.as_deref() {
                    save_json(inner.store.as_ref(), key, &value);
                }
                let applied = inner.publish(generation, |state| {
                    state.data = Some(value);
                    state.error = None;
                    state.is_loading = false;
                    state.phase = RetryPhase::Done;
                });
                if applied {
                    board_info!("Loaded {} on attempt {}", url, attempt + 1);
                }
                return;
            }
            Err(err) if err.is_cancelled() => {
                inner.publish(generation, |state| {
                    state.error = Some(LoadError::Aborted);
                    state.is_loading = false;
                    state.phase = RetryPhase::Cancelled;
                });
                return;
            }
            Err(err) => err,
        };

        attempt += 1;
        if attempt >= max_attempts {
            board_warn!("Giving up on {} after {} attempt(s): {}", url, attempt, err);
            inner.publish(generation, |state| {
                state.error = Some(LoadError::Exhausted {
                    attempts: attempt,
                    last: err,
                });
                state.is_loading = false;
                state.phase = RetryPhase::Failed;
            });
            return;
        }

        let wait = policy.backoff(attempt - 1, (inner.jitter)(policy.max_jitter));
        board_warn!(
            "Attempt {} for {} failed ({}); retrying in {:?}",
            attempt,
            url,
            err,
            wait
        );
        inner.publish(generation, |state| {
            state.phase = RetryPhase::BackoffWaiting(attempt)
        });
        tokio::select! {
            _ = token.cancelled() => return,
            _ = tokio::time::sleep(wait) => {}
        }
    }
}
