//! The dispatcher and per-operation handlers.

use super::command::build_invocation;
use super::error::{GitError, GitResult};
use super::path::{clone_target, resolve_path};
use super::repository;
use super::request::GitRequest;
use super::runner::{CommandRunner, ProcessRunner};
use super::types::{Operation, OperationResult};
use crate::config::AdapterConfig;
use crate::context::ExecutionContext;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A finished call: the structured result and the text summary built from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Execution {
    pub result: OperationResult,
    pub summary: String,
}

/// Runs git operations on behalf of a caller.
///
/// Holds nothing but its configuration and runner, so one adapter can serve
/// concurrent calls.
pub struct GitAdapter {
    config: AdapterConfig,
    runner: Box<dyn CommandRunner>,
}

impl GitAdapter {
    pub fn new(config: AdapterConfig) -> Self {
        Self::with_runner(config, Box::new(ProcessRunner::new()))
    }

    pub fn with_runner(config: AdapterConfig, runner: Box<dyn CommandRunner>) -> Self {
        Self { config, runner }
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    pub fn working_dir(&self) -> &Path {
        &self.config.working_dir
    }

    /// Checks that the configured git program can be run. The check blocks,
    /// so it runs on tokio's blocking pool.
    pub async fn check_tool_available(&self) -> GitResult<()> {
        let program = self.config.git_program.clone();
        tokio::task::spawn_blocking(move || repository::check_tool_available(&program))
            .await
            .map_err(|e| GitError::ToolUnavailable {
                program: self.config.git_program.clone(),
                message: e.to_string(),
            })?
    }

    /// Validates `request`, runs its handler and summarizes the result.
    ///
    /// Handler errors are returned as-is; an [`GitError::ExecutionFailure`]
    /// still carries the captured output.
    pub async fn execute(
        &self,
        ctx: &ExecutionContext,
        request: &GitRequest,
    ) -> GitResult<Execution> {
        request.validate()?;
        let result = self.handle(ctx, request).await?;
        let summary = summarize(&result);
        Ok(Execution { result, summary })
    }

    async fn handle(
        &self,
        ctx: &ExecutionContext,
        request: &GitRequest,
    ) -> GitResult<OperationResult> {
        let operation = request.operation();
        if let Some(reason) = ctx.interrupted() {
            return Err(GitError::Cancelled { operation, reason });
        }

        match request {
            GitRequest::Clone { .. } => self.clone_repository(ctx, request).await,
            GitRequest::Init { .. } => self.init_repository(ctx, request).await,
            GitRequest::Diff { .. } => self.diff(ctx, request).await,
            GitRequest::Status { .. }
            | GitRequest::Log { .. }
            | GitRequest::Add { .. }
            | GitRequest::Commit { .. }
            | GitRequest::Push { .. }
            | GitRequest::Pull { .. }
            | GitRequest::Branch { .. }
            | GitRequest::Checkout { .. } => {
                let path = resolve_path(request.path(), self.working_dir());
                fail_on_error(self.invoke(ctx, request, path).await?)
            }
        }
    }

    async fn clone_repository(
        &self,
        ctx: &ExecutionContext,
        request: &GitRequest,
    ) -> GitResult<OperationResult> {
        let target = clone_target(request.path(), self.working_dir());
        if let Some(parent) = target.parent() {
            create_dir(Operation::Clone, parent).await?;
        }
        fail_on_error(self.invoke(ctx, request, target).await?)
    }

    async fn init_repository(
        &self,
        ctx: &ExecutionContext,
        request: &GitRequest,
    ) -> GitResult<OperationResult> {
        let target = resolve_path(request.path(), self.working_dir());
        create_dir(Operation::Init, &target).await?;
        fail_on_error(self.invoke(ctx, request, target).await?)
    }

    /// Diff never fails on a git error: the failure text stays on the result
    /// as an advisory. Whether this is meant to cover only the "differences
    /// found" exit state is unknown, so every git failure is treated alike.
    /// Interrupted contexts still fail the call.
    async fn diff(
        &self,
        ctx: &ExecutionContext,
        request: &GitRequest,
    ) -> GitResult<OperationResult> {
        let path = resolve_path(request.path(), self.working_dir());
        let result = self.invoke(ctx, request, path).await?;
        if let Some(error) = result.error() {
            warn!(operation = "diff", %error, "git reported failure; kept as advisory");
        }
        Ok(result)
    }

    async fn invoke(
        &self,
        ctx: &ExecutionContext,
        request: &GitRequest,
        path: PathBuf,
    ) -> GitResult<OperationResult> {
        let operation = request.operation();
        let invocation = build_invocation(&self.config.git_program, request, &path);
        let output = self
            .runner
            .run(ctx, &invocation)
            .await
            .map_err(|reason| GitError::Cancelled { operation, reason })?;

        debug!(%operation, path = %path.display(), success = output.is_success(), "operation finished");
        Ok(OperationResult::new(
            operation,
            output.combined,
            output.failure,
            path,
        ))
    }
}

/// `"Git <operation> operation completed.\n"`, then the raw output, then any
/// advisory error on its own line.
pub fn summarize(result: &OperationResult) -> String {
    let mut text = format!("Git {} operation completed.\n", result.operation());
    text.push_str(result.output());
    if let Some(error) = result.error() {
        text.push_str("\nWarnings/Errors: ");
        text.push_str(error);
    }
    text
}

fn fail_on_error(result: OperationResult) -> GitResult<OperationResult> {
    match result.error() {
        Some(message) => Err(GitError::ExecutionFailure {
            operation: result.operation(),
            message: message.to_string(),
            result: Box::new(result),
        }),
        None => Ok(result),
    }
}

async fn create_dir(operation: Operation, path: &Path) -> GitResult<()> {
    tokio::fs::create_dir_all(path)
        .await
        .map_err(|source| GitError::FilesystemFailure {
            operation,
            path: path.display().to_string(),
            source,
        })
}
