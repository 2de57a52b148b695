//! Process execution.
//!
//! [`CommandRunner`] is the seam between the handlers and the operating
//! system. [`ProcessRunner`] spawns real processes with `tokio::process`;
//! tests substitute a recording double.

use super::command::Invocation;
use crate::context::{ExecutionContext, Interrupted};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, warn};

/// What a finished (or unstartable) process left behind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// stdout followed by stderr.
    pub combined: String,
    /// Exit code, `None` if the process never ran or was killed by a signal.
    pub exit_code: Option<i32>,
    /// Failure description, `None` on a zero exit status.
    pub failure: Option<String>,
}

impl CommandOutput {
    pub fn success(combined: impl Into<String>) -> Self {
        Self {
            combined: combined.into(),
            exit_code: Some(0),
            failure: None,
        }
    }

    pub fn failed(
        combined: impl Into<String>,
        exit_code: Option<i32>,
        failure: impl Into<String>,
    ) -> Self {
        Self {
            combined: combined.into(),
            exit_code,
            failure: Some(failure.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }
}

#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs `invocation` to completion, or until `ctx` is done.
    ///
    /// Spawn errors and non-zero exits are reported in the returned
    /// [`CommandOutput`]; only an interrupted context is an `Err`.
    async fn run(
        &self,
        ctx: &ExecutionContext,
        invocation: &Invocation,
    ) -> Result<CommandOutput, Interrupted>;
}

/// Runs invocations as child processes.
///
/// Children get a closed stdin and `GIT_TERMINAL_PROMPT=0`, so a network
/// operation that needs credentials fails instead of waiting for input.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(
        &self,
        ctx: &ExecutionContext,
        invocation: &Invocation,
    ) -> Result<CommandOutput, Interrupted> {
        if let Some(reason) = ctx.interrupted() {
            return Err(reason);
        }

        let mut command = Command::new(&invocation.program);
        command
            .args(&invocation.args)
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        debug!(command = %invocation, "spawning");

        let child = match command.spawn() {
            Ok(child) => child,
            Err(e) => {
                warn!(command = %invocation, error = %e, "failed to spawn");
                return Ok(CommandOutput::failed(String::new(), None, e.to_string()));
            }
        };

        // Dropping the wait future drops the child, which kills it.
        let output = tokio::select! {
            biased;
            reason = ctx.done() => {
                warn!(command = %invocation, %reason, "killing child process");
                return Err(reason);
            }
            output = child.wait_with_output() => output,
        };

        let output = match output {
            Ok(output) => output,
            Err(e) => return Ok(CommandOutput::failed(String::new(), None, e.to_string())),
        };

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        debug!(command = %invocation, status = %output.status, "finished");

        if output.status.success() {
            Ok(CommandOutput::success(combined))
        } else {
            Ok(CommandOutput::failed(
                combined,
                output.status.code(),
                output.status.to_string(),
            ))
        }
    }
}
