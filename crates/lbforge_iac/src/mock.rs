//! Mock command runner for testing.
//!
//! Provides a configurable mock implementation of the CommandRunner trait
//! for use in unit tests without requiring a real terraform binary.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use crate::error::{IacError, IacResult};
use crate::runner::{CommandRunner, ExecutionResult};

/// Predefined mock response for a command execution.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub exit_code: i64,
    pub stdout: String,
    pub stderr: String,
}

impl MockResponse {
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            exit_code: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failure(exit_code: i64, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

/// Captured call information for verification.
#[derive(Debug, Clone)]
pub struct CapturedCall {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

/// Mock command runner for testing.
///
/// Captures all calls and returns predefined responses in order, allowing
/// tests to verify the exact terraform command sequence without running
/// anything. When the response queue is exhausted it keeps returning a
/// generic success.
#[derive(Clone, Default)]
pub struct MockRunner {
    responses: Arc<RwLock<Vec<MockResponse>>>,
    response_index: Arc<AtomicUsize>,
    captured_calls: Arc<RwLock<Vec<CapturedCall>>>,
    available: Arc<RwLock<bool>>,
}

impl MockRunner {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(RwLock::new(Vec::new())),
            response_index: Arc::new(AtomicUsize::new(0)),
            captured_calls: Arc::new(RwLock::new(Vec::new())),
            available: Arc::new(RwLock::new(true)),
        }
    }

    /// Queue a response for the next `run` call.
    pub fn push_response(&self, response: MockResponse) {
        self.responses.write().push(response);
    }

    pub fn set_available(&self, available: bool) {
        *self.available.write() = available;
    }

    /// All calls made so far, in order.
    pub fn calls(&self) -> Vec<CapturedCall> {
        self.captured_calls.read().clone()
    }

    fn next_response(&self) -> MockResponse {
        let index = self.response_index.fetch_add(1, Ordering::SeqCst);
        let responses = self.responses.read();
        responses
            .get(index)
            .cloned()
            .unwrap_or_else(|| MockResponse::success(""))
    }
}

#[async_trait]
impl CommandRunner for MockRunner {
    async fn is_available(&self, _program: &str) -> IacResult<bool> {
        Ok(*self.available.read())
    }

    async fn version(&self, program: &str) -> IacResult<String> {
        if *self.available.read() {
            Ok(format!("{} mock 0.0.0", program))
        } else {
            Err(IacError::TerraformNotAvailable(program.to_string()))
        }
    }

    async fn run(&self, program: &str, args: &[String], cwd: &Path) -> IacResult<ExecutionResult> {
        self.captured_calls.write().push(CapturedCall {
            program: program.to_string(),
            args: args.to_vec(),
            cwd: cwd.to_path_buf(),
        });

        let response = self.next_response();
        let now = Utc::now();
        Ok(ExecutionResult {
            exit_code: response.exit_code,
            stdout: response.stdout,
            stderr: response.stderr,
            started_at: now,
            finished_at: now,
            duration_ms: 1,
        })
    }
}
