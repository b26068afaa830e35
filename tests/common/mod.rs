#![allow(dead_code)]
//! Shared fixtures for controller and service tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;
use tokio::time::{Duration, advance};

use pmboard::fetch::errors::{FetchError, FetchResult};
use pmboard::fetch::{FetchParams, ResourceFetcher, ResourceWriter, ResultPage};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TestItem {
    pub id: i64,
    pub name: String,
}

pub fn item(id: i64) -> TestItem {
    TestItem {
        id,
        name: format!("item-{id}"),
    }
}

pub fn page(ids: &[i64], total: usize, total_pages: usize, page_no: usize) -> ResultPage<TestItem> {
    ResultPage {
        items: ids.iter().copied().map(item).collect(),
        total,
        total_pages,
        page: page_no,
    }
}

/// Outcome one scripted fetch resolves with.
enum Step {
    Ok(ResultPage<TestItem>),
    Err(String),
    /// Resolution deferred until the test releases it through the sender.
    Pending(oneshot::Receiver<FetchResult<ResultPage<TestItem>>>),
}

#[derive(Default)]
struct ScriptState {
    steps: VecDeque<Step>,
    seen: Vec<FetchParams>,
}

/// Fetcher serving pre-scripted responses in order, recording every
/// request's parameters. Unscripted requests resolve to an empty page.
#[derive(Clone, Default)]
pub struct ScriptedFetcher {
    inner: Arc<Mutex<ScriptState>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_ok(&self, page: ResultPage<TestItem>) {
        self.inner.lock().unwrap().steps.push_back(Step::Ok(page));
    }

    pub fn push_err(&self, message: &str) {
        self.inner
            .lock()
            .unwrap()
            .steps
            .push_back(Step::Err(message.to_string()));
    }

    /// Scripts a response the test resolves later through the returned
    /// sender.
    pub fn push_pending(&self) -> oneshot::Sender<FetchResult<ResultPage<TestItem>>> {
        let (tx, rx) = oneshot::channel();
        self.inner
            .lock()
            .unwrap()
            .steps
            .push_back(Step::Pending(rx));
        tx
    }

    pub fn calls(&self) -> usize {
        self.inner.lock().unwrap().seen.len()
    }

    pub fn seen(&self) -> Vec<FetchParams> {
        self.inner.lock().unwrap().seen.clone()
    }
}

#[async_trait]
impl ResourceFetcher<TestItem> for ScriptedFetcher {
    async fn fetch(&self, params: &FetchParams) -> FetchResult<ResultPage<TestItem>> {
        let step = {
            let mut state = self.inner.lock().unwrap();
            state.seen.push(params.clone());
            state.steps.pop_front()
        };
        match step {
            Some(Step::Ok(page)) => Ok(page),
            Some(Step::Err(message)) => Err(FetchError::Transport(message)),
            Some(Step::Pending(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(FetchError::Transport("script dropped".to_string()))),
            None => Ok(ResultPage {
                items: Vec::new(),
                total: 0,
                total_pages: 1,
                page: params.page,
            }),
        }
    }
}

/// Writer recording mutation calls, optionally failing them all.
#[derive(Clone, Default)]
pub struct RecordingWriter {
    calls: Arc<Mutex<Vec<String>>>,
    fail: Arc<Mutex<bool>>,
}

impl RecordingWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_all(&self) {
        *self.fail.lock().unwrap() = true;
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, entry: String) -> FetchResult<()> {
        self.calls.lock().unwrap().push(entry);
        if *self.fail.lock().unwrap() {
            Err(FetchError::Status { status: 500 })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl<N: Send + Sync, U: Send + Sync> ResourceWriter<N, U> for RecordingWriter {
    async fn create(&self, _payload: &N) -> FetchResult<()> {
        self.record("create".to_string())
    }

    async fn update(&self, id: i64, _payload: &U) -> FetchResult<()> {
        self.record(format!("update:{id}"))
    }

    async fn delete(&self, id: i64) -> FetchResult<()> {
        self.record(format!("delete:{id}"))
    }
}

/// Lets spawned controller tasks run to their next await point.
pub async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

/// Steps paused time forward in small increments, yielding between steps so
/// tasks woken by one timer get to register the next.
pub async fn run_for(ms: u64) {
    for _ in 0..ms.div_ceil(50) {
        advance(Duration::from_millis(50)).await;
        settle().await;
    }
}
