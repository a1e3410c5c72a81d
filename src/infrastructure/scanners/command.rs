//! Bounded external command execution

use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// Captured output of one finished external command.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub success: bool,
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Errors that keep a command from producing output.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("execution timed out after {seconds} seconds")]
    Timeout { seconds: u64 },

    #[error("failed to execute command: {0}")]
    Spawn(String),
}

impl CommandError {
    /// In-band failure text for adapter results. Adapters never surface a
    /// `CommandError` to callers; they report it through this string form.
    pub fn to_failure_text(&self, tool: &str) -> String {
        match self {
            Self::Timeout { seconds } => {
                format!("{} scan timed out after {} seconds.", tool, seconds)
            }
            Self::Spawn(cause) => {
                format!("Unexpected error during {} scan: {}", tool, cause)
            }
        }
    }
}

/// Process invocation seam.
///
/// Adapters depend on this trait rather than on `tokio::process` directly
/// so tests can substitute scripted runners.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(
        &self,
        program: &str,
        args: &[String],
        timeout: Duration,
    ) -> Result<CommandOutput, CommandError>;
}

/// Real command runner backed by `tokio::process`.
#[derive(Debug, Default)]
pub struct TokioCommandRunner;

impl TokioCommandRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for TokioCommandRunner {
    async fn run(
        &self,
        program: &str,
        args: &[String],
        timeout: Duration,
    ) -> Result<CommandOutput, CommandError> {
        debug!(program, ?args, timeout_secs = timeout.as_secs(), "Executing external command");

        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            // The child must not outlive a timed-out invocation.
            .kill_on_drop(true);

        let output = tokio::time::timeout(timeout, cmd.output())
            .await
            .map_err(|_| CommandError::Timeout {
                seconds: timeout.as_secs(),
            })?
            .map_err(|e| CommandError::Spawn(e.to_string()))?;

        Ok(CommandOutput {
            success: output.status.success(),
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
