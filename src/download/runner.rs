//! External process boundary
//!
//! All child processes (yt-dlp itself, plugin queries) go through the
//! [`CommandRunner`] trait so the orchestrator can be exercised against a
//! scripted runner in tests. [`ProcessRunner`] is the production
//! implementation on top of `tokio::process`.

use crate::error::VdlError;
use crate::Result;
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// How a child process ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Process exited; code is -1 when killed by a signal
    Exited(i32),
    /// Wall-clock limit hit; the child was killed
    TimedOut,
}

/// Collected result of one child process run
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub status: RunStatus,
    pub stdout: String,
    pub stderr: String,
}

impl RunOutput {
    pub fn success(&self) -> bool {
        self.status == RunStatus::Exited(0)
    }

    pub fn timed_out(&self) -> bool {
        self.status == RunStatus::TimedOut
    }

    fn expired() -> Self {
        Self {
            status: RunStatus::TimedOut,
            stdout: String::new(),
            stderr: String::new(),
        }
    }
}

/// Seam between the orchestrator and the operating system.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run to completion with both output streams captured. Used for
    /// auxiliary queries (`--version`, `-j`, `-F`, plugin lookups).
    async fn capture(&self, program: &str, args: &[String], timeout: Duration)
        -> Result<RunOutput>;

    /// Run interactively: stdout is inherited so the child can render its
    /// own progress, stderr is echoed line-by-line and retained for
    /// failure classification. Used for download attempts.
    async fn stream(&self, program: &str, args: &[String], timeout: Duration)
        -> Result<RunOutput>;
}

/// Production runner. Cancellation kills the in-flight child (spawned with
/// `kill_on_drop`) and surfaces [`VdlError::Interrupted`].
pub struct ProcessRunner {
    cancel: CancellationToken,
}

impl ProcessRunner {
    pub fn new(cancel: CancellationToken) -> Self {
        Self { cancel }
    }

    fn spawn_error(program: &str, source: std::io::Error) -> VdlError {
        VdlError::Spawn {
            program: program.to_string(),
            source,
        }
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn capture(
        &self,
        program: &str,
        args: &[String],
        timeout: Duration,
    ) -> Result<RunOutput> {
        debug!("capture: {} {}", program, args.join(" "));
        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = cmd
            .spawn()
            .map_err(|e| Self::spawn_error(program, e))?;

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(VdlError::Interrupted),
            result = tokio::time::timeout(timeout, child.wait_with_output()) => match result {
                Ok(Ok(output)) => Ok(RunOutput {
                    status: RunStatus::Exited(output.status.code().unwrap_or(-1)),
                    stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                }),
                Ok(Err(e)) => Err(e.into()),
                Err(_) => Ok(RunOutput::expired()),
            },
        }
    }

    async fn stream(
        &self,
        program: &str,
        args: &[String],
        timeout: Duration,
    ) -> Result<RunOutput> {
        debug!("stream: {} {}", program, args.join(" "));
        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd
            .spawn()
            .map_err(|e| Self::spawn_error(program, e))?;
        let stderr = child.stderr.take();

        let run = async move {
            let mut captured = String::new();
            if let Some(stderr) = stderr {
                let mut lines = BufReader::new(stderr).lines();
                while let Some(line) = lines.next_line().await? {
                    eprintln!("{}", line);
                    captured.push_str(&line);
                    captured.push('\n');
                }
            }
            let status = child.wait().await?;
            Ok::<_, std::io::Error>((status, captured))
        };

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(VdlError::Interrupted),
            result = tokio::time::timeout(timeout, run) => match result {
                Ok(Ok((status, stderr))) => Ok(RunOutput {
                    status: RunStatus::Exited(status.code().unwrap_or(-1)),
                    stdout: String::new(),
                    stderr,
                }),
                Ok(Err(e)) => Err(e.into()),
                Err(_) => Ok(RunOutput::expired()),
            },
        }
    }
}
