#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use jobboard_engine::{FailureKind, FetchError, FetchMetadata, FetchOutput, Fetcher, JitterFn};
use tokio::time::Instant;

pub fn init_logging() {
    jobboard_logging::initialize_for_tests();
}

pub fn fixed_jitter(value: Duration) -> JitterFn {
    Arc::new(move |_| value)
}

pub fn output(url: &str, body: &str) -> FetchOutput {
    FetchOutput {
        bytes: body.as_bytes().to_vec(),
        metadata: FetchMetadata {
            original_url: url.to_string(),
            final_url: url.to_string(),
            status: 200,
            content_type: Some("application/json".to_string()),
            byte_len: body.len() as u64,
        },
    }
}

enum Step {
    Body(String),
    Status(u16),
    Delayed(Duration, String),
    Hang,
}

/// Fetcher that replays a fixed script and records when each call happened.
#[derive(Default)]
pub struct ScriptedFetcher {
    steps: Mutex<VecDeque<Step>>,
    calls: Mutex<Vec<(String, Instant)>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then_ok(self, body: &str) -> Self {
        self.push(Step::Body(body.to_string()))
    }

    pub fn then_status(self, code: u16) -> Self {
        self.push(Step::Status(code))
    }

    pub fn then_delayed(self, delay: Duration, body: &str) -> Self {
        self.push(Step::Delayed(delay, body.to_string()))
    }

    pub fn then_hang(self) -> Self {
        self.push(Step::Hang)
    }

    fn push(self, step: Step) -> Self {
        self.steps.lock().unwrap().push_back(step);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn call_times(&self) -> Vec<Instant> {
        self.calls.lock().unwrap().iter().map(|(_, at)| *at).collect()
    }

    pub fn called_urls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(url, _)| url.clone())
            .collect()
    }
}

#[async_trait::async_trait]
impl Fetcher for ScriptedFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchOutput, FetchError> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), Instant::now()));
        let step = self.steps.lock().unwrap().pop_front();
        match step {
            Some(Step::Body(body)) => Ok(output(url, &body)),
            Some(Step::Status(code)) => Err(FetchError::new(
                FailureKind::HttpStatus(code),
                format!("HTTP {code}"),
            )),
            Some(Step::Delayed(delay, body)) => {
                tokio::time::sleep(delay).await;
                Ok(output(url, &body))
            }
            Some(Step::Hang) | None => std::future::pending().await,
        }
    }
}
