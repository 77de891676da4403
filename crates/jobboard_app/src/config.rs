//! `jobboard.ron` configuration.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use jobboard_engine::RetryPolicy;
use log::LevelFilter;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILENAME: &str = "jobboard.ron";

/// Destination for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LogDestination {
    /// Write to ./jobboard.log in the current directory.
    #[default]
    File,
    /// Write to the terminal (stderr).
    Terminal,
    /// Write to both file and terminal.
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// File path or `http(s)://` URL. `None` uses the bundled dataset.
    pub dataset: Option<String>,
    pub store_dir: PathBuf,
    /// Page address share links are built on.
    pub base_url: String,
    pub debounce_ms: u64,
    pub recent_limit: usize,
    pub retries: u32,
    pub backoff_ms: u64,
    pub log_destination: LogDestination,
    pub log_level: LogLevel,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            dataset: None,
            store_dir: PathBuf::from("./.jobboard"),
            base_url: "https://jobs.local/".to_string(),
            debounce_ms: 200,
            recent_limit: 5,
            retries: 3,
            backoff_ms: 400,
            log_destination: LogDestination::File,
            log_level: LogLevel::Info,
        }
    }
}

impl BoardConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            retries: self.retries,
            backoff_base: Duration::from_millis(self.backoff_ms),
            ..RetryPolicy::default()
        }
    }
}

pub fn parse_config(text: &str) -> Result<BoardConfig, ron::error::SpannedError> {
    ron::from_str(text)
}

/// Reads the config at `path`, or `./jobboard.ron` when no path is given.
///
/// The default file may be absent; an explicit one may not. A file that does
/// not parse is reported on stderr and replaced by defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<BoardConfig> {
    let (path, explicit) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(CONFIG_FILENAME), false),
    };

    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound && !explicit => {
            return Ok(BoardConfig::default());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read config {}", path.display()));
        }
    };

    match parse_config(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            // Logging is configured from this file, so it is not running yet.
            eprintln!(
                "Warning: Could not parse config at {:?}: {}; using defaults",
                path, err
            );
            Ok(BoardConfig::default())
        }
    }
}
