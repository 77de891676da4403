use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use jobboard_core::Job;
use jobboard_engine::{
    keys, FetchSettings, Fetcher, KeyValueStore, LoadOptions, ReqwestFetcher, RetryPolicy,
    RetryingFetch,
};
use jobboard_logging::{board_info, board_warn};

/// Listing compiled into the binary.
pub const BUNDLED_DATASET: &str = include_str!("../data/data.json");

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    Bundled,
    File(PathBuf),
    Remote(String),
}

impl DatasetSource {
    pub fn from_config(value: Option<&str>) -> Self {
        match value {
            None => DatasetSource::Bundled,
            Some(raw) if raw.starts_with("http://") || raw.starts_with("https://") => {
                DatasetSource::Remote(raw.to_string())
            }
            Some(raw) => DatasetSource::File(PathBuf::from(raw)),
        }
    }
}

pub fn parse_jobs(text: &str) -> anyhow::Result<Vec<Job>> {
    serde_json::from_str(text).context("dataset is not a JSON array of jobs")
}

pub async fn load_dataset(
    source: &DatasetSource,
    store: Arc<dyn KeyValueStore>,
    policy: RetryPolicy,
) -> anyhow::Result<Vec<Job>> {
    match source {
        DatasetSource::Bundled => parse_jobs(BUNDLED_DATASET),
        DatasetSource::File(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read dataset {}", path.display()))?;
            parse_jobs(&text)
        }
        DatasetSource::Remote(url) => {
            let fetcher = Arc::new(ReqwestFetcher::new(FetchSettings::default()));
            load_remote(fetcher, store, url, policy).await
        }
    }
}

/// Fetches the dataset with retries. A cached copy stands in when every attempt fails.
pub async fn load_remote(
    fetcher: Arc<dyn Fetcher>,
    store: Arc<dyn KeyValueStore>,
    url: &str,
    policy: RetryPolicy,
) -> anyhow::Result<Vec<Job>> {
    let loader: RetryingFetch<Vec<Job>> = RetryingFetch::new(fetcher, store);
    let options = LoadOptions {
        policy,
        cache_key: Some(keys::DATASET_CACHE.to_string()),
    };
    loader
        .load(url, options)
        .await
        .context("dataset loader stopped unexpectedly")?;

    let state = loader.state();
    match (state.data, state.error) {
        (Some(jobs), None) => {
            board_info!("Loaded {} job(s) from {}", jobs.len(), url);
            Ok(jobs)
        }
        (Some(jobs), Some(err)) => {
            board_warn!("Showing cached dataset; refresh from {} failed: {}", url, err);
            Ok(jobs)
        }
        (None, Some(err)) => {
            Err(anyhow::Error::new(err).context(format!("failed to load dataset from {url}")))
        }
        (None, None) => bail!("dataset loader finished without data"),
    }
}
