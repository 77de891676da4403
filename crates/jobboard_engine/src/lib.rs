//! Job board engine: persistence, location sync and data loading.
mod fetch;
mod location;
mod preferences;
mod retry;
mod store;
mod synced;
mod types;

pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use location::{Location, MemoryLocation};
pub use preferences::Preferences;
pub use retry::{
    full_jitter, JitterFn, LoadError, LoadOptions, LoadState, RetryPhase, RetryPolicy,
    RetryingFetch,
};
pub use store::{keys, load_json, save_json, FileStore, KeyValueStore, MemoryStore, StoreError};
pub use synced::{PersistentState, SyncSettings, DEFAULT_DEBOUNCE};
pub use types::{FailureKind, FetchError, FetchMetadata, FetchOutput};
