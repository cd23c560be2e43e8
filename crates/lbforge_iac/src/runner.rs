//! Command runner trait and types.

use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::IacResult;

/// Result of a subprocess execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Exit code of the process
    pub exit_code: i64,
    /// Captured stdout
    pub stdout: String,
    /// Captured stderr
    pub stderr: String,
    /// Execution start time
    pub started_at: DateTime<Utc>,
    /// Execution end time
    pub finished_at: DateTime<Utc>,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl ExecutionResult {
    /// Check if execution was successful (exit code 0).
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Get combined output (stdout + stderr).
    pub fn combined_output(&self) -> String {
        if self.stdout.is_empty() {
            self.stderr.clone()
        } else if self.stderr.is_empty() {
            self.stdout.clone()
        } else {
            format!("{}\n{}", self.stdout, self.stderr)
        }
    }
}

/// Subprocess runner trait.
///
/// The seam between the Terraform lifecycle and the host: production code uses
/// [`crate::ProcessRunner`], tests use [`crate::MockRunner`].
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Check if the given program can be executed at all.
    async fn is_available(&self, program: &str) -> IacResult<bool>;

    /// Get the program's version string.
    async fn version(&self, program: &str) -> IacResult<String>;

    /// Run a program with the given arguments in the given working directory.
    async fn run(&self, program: &str, args: &[String], cwd: &Path) -> IacResult<ExecutionResult>;
}
