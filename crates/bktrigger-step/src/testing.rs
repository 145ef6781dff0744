//! Fakes shared by the unit tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use bktrigger_client::{BuildApi, ClientError, CreateBuildRequest};
use bktrigger_core::{Build, BuildState};
use tokio_util::sync::CancellationToken;

use crate::host::{HostContext, ProgressSink};

pub fn build(number: u64, state: &str) -> Build {
    Build {
        id: format!("build-{}", number),
        number,
        state: BuildState::from(state),
        web_url: format!("https://buildkite.com/test-org/test-pipeline/builds/{}", number),
        url: format!(
            "https://api.buildkite.com/v2/organizations/test-org/pipelines/test-pipeline/builds/{}",
            number
        ),
        commit: "HEAD".to_string(),
        branch: "main".to_string(),
        message: None,
    }
}

/// Collects progress lines in memory.
#[derive(Default)]
pub struct RecordingSink {
    lines: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl ProgressSink for RecordingSink {
    fn line(&self, line: &str) {
        self.lines.lock().unwrap().push(line.to_string());
    }
}

/// Host with a settable pause flag that counts display-name lookups.
pub struct TestHost {
    name: String,
    paused: AtomicBool,
    name_calls: AtomicUsize,
}

impl TestHost {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            paused: AtomicBool::new(false),
            name_calls: AtomicUsize::new(0),
        }
    }

    pub fn pause(&self) {
        self.paused.store(true, Ordering::SeqCst);
    }

    pub fn name_calls(&self) -> usize {
        self.name_calls.load(Ordering::SeqCst)
    }
}

impl HostContext for TestHost {
    fn display_name(&self) -> String {
        self.name_calls.fetch_add(1, Ordering::SeqCst);
        self.name.clone()
    }

    fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }
}

/// BuildApi that replays scripted responses and records calls.
pub struct ScriptedApi {
    create: Mutex<Option<Result<Build, ClientError>>>,
    polls: Mutex<VecDeque<Result<Build, ClientError>>>,
    created_with: Mutex<Option<(String, String, CreateBuildRequest)>>,
    polled: Mutex<Vec<(String, String, u64)>>,
    create_calls: AtomicUsize,
    cancel_after_polls: Option<(usize, CancellationToken)>,
}

impl ScriptedApi {
    pub fn new(create: Result<Build, ClientError>) -> Self {
        Self {
            create: Mutex::new(Some(create)),
            polls: Mutex::new(VecDeque::new()),
            created_with: Mutex::new(None),
            polled: Mutex::new(Vec::new()),
            create_calls: AtomicUsize::new(0),
            cancel_after_polls: None,
        }
    }

    /// Builder method to queue a status response.
    pub fn then_poll(self, response: Result<Build, ClientError>) -> Self {
        self.polls.lock().unwrap().push_back(response);
        self
    }

    /// Builder method to fire `token` once `count` polls have been answered.
    pub fn cancel_after(mut self, count: usize, token: CancellationToken) -> Self {
        self.cancel_after_polls = Some((count, token));
        self
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn created_with(&self) -> Option<(String, String, CreateBuildRequest)> {
        self.created_with.lock().unwrap().clone()
    }

    pub fn polled(&self) -> Vec<(String, String, u64)> {
        self.polled.lock().unwrap().clone()
    }
}

#[async_trait]
impl BuildApi for ScriptedApi {
    async fn create_build(
        &self,
        organization: &str,
        pipeline: &str,
        request: &CreateBuildRequest,
    ) -> Result<Build, ClientError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        *self.created_with.lock().unwrap() =
            Some((organization.to_string(), pipeline.to_string(), request.clone()));
        self.create
            .lock()
            .unwrap()
            .take()
            .expect("create_build called more than once")
    }

    async fn get_build(
        &self,
        organization: &str,
        pipeline: &str,
        number: u64,
    ) -> Result<Build, ClientError> {
        let count = {
            let mut polled = self.polled.lock().unwrap();
            polled.push((organization.to_string(), pipeline.to_string(), number));
            polled.len()
        };
        if let Some((after, token)) = &self.cancel_after_polls {
            if count >= *after {
                token.cancel();
            }
        }
        self.polls
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected get_build call")
    }
}
