//! Subprocess-based command runner.
//!
//! Runs programs directly on the host via `tokio::process`, streaming each
//! output line through tracing as it arrives (so long-running `terraform apply`
//! runs stay observable) while also capturing the full output for the caller.

use std::path::Path;
use std::process::Stdio;
use std::time::Instant;

use async_trait::async_trait;
use chrono::Utc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::error::{IacError, IacResult};
use crate::runner::{CommandRunner, ExecutionResult};

/// Command runner backed by host subprocesses.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn is_available(&self, program: &str) -> IacResult<bool> {
        Ok(self.version(program).await.is_ok())
    }

    async fn version(&self, program: &str) -> IacResult<String> {
        let result = self.run(program, &["version".to_string()], Path::new(".")).await?;
        if result.success() {
            Ok(result.stdout.lines().next().unwrap_or_default().to_string())
        } else {
            Err(IacError::ExecutionFailed(result.combined_output()))
        }
    }

    async fn run(&self, program: &str, args: &[String], cwd: &Path) -> IacResult<ExecutionResult> {
        debug!("Running {} {:?} in {:?}", program, args, cwd);
        let started_at = Utc::now();
        let start = Instant::now();

        let mut child = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => IacError::TerraformNotAvailable(format!(
                    "'{}' not found, is it installed and in your PATH?",
                    program
                )),
                _ => IacError::Io(e),
            })?;

        let stdout_pipe = child.stdout.take();
        let stderr_pipe = child.stderr.take();

        let stdout_task = tokio::spawn(async move {
            let mut captured = String::new();
            if let Some(pipe) = stdout_pipe {
                let mut lines = BufReader::new(pipe).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    info!("{}", line);
                    captured.push_str(&line);
                    captured.push('\n');
                }
            }
            captured
        });

        let stderr_task = tokio::spawn(async move {
            let mut captured = String::new();
            if let Some(pipe) = stderr_pipe {
                let mut lines = BufReader::new(pipe).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    warn!("{}", line);
                    captured.push_str(&line);
                    captured.push('\n');
                }
            }
            captured
        });

        let status = child.wait().await?;
        let stdout = stdout_task
            .await
            .map_err(|e| IacError::ExecutionFailed(e.to_string()))?;
        let stderr = stderr_task
            .await
            .map_err(|e| IacError::ExecutionFailed(e.to_string()))?;

        let finished_at = Utc::now();
        Ok(ExecutionResult {
            exit_code: status.code().unwrap_or(-1) as i64,
            stdout,
            stderr,
            started_at,
            finished_at,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }
}
