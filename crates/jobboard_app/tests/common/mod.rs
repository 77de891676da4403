#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use jobboard_app::clipboard::{Clipboard, CopyMethod};
use jobboard_app::config::BoardConfig;
use jobboard_app::dataset::{parse_jobs, BUNDLED_DATASET};
use jobboard_app::Board;
use jobboard_engine::MemoryStore;

pub const FIXED_MS: i64 = 1_700_000_000_000;

pub fn init_logging() {
    jobboard_logging::initialize_for_tests();
}

pub fn fixed_clock() -> i64 {
    FIXED_MS
}

#[derive(Default)]
pub struct RecordingClipboard {
    pub copies: Mutex<Vec<String>>,
    pub fail: bool,
}

impl RecordingClipboard {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn copies(&self) -> Vec<String> {
        self.copies.lock().unwrap().clone()
    }
}

impl Clipboard for RecordingClipboard {
    fn copy(&self, text: &str) -> anyhow::Result<CopyMethod> {
        if self.fail {
            return Err(anyhow!("no clipboard available"));
        }
        self.copies.lock().unwrap().push(text.to_string());
        Ok(CopyMethod::Terminal)
    }
}

pub fn board_with(store: Arc<MemoryStore>, clipboard: Arc<RecordingClipboard>) -> Board {
    Board {
        config: BoardConfig::default(),
        store,
        jobs: parse_jobs(BUNDLED_DATASET).unwrap(),
        clipboard,
        clock: fixed_clock,
    }
}

pub fn board(store: Arc<MemoryStore>) -> Board {
    board_with(store, Arc::new(RecordingClipboard::default()))
}
