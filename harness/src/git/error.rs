use super::types::{Operation, OperationResult};
use crate::context::Interrupted;
use thiserror::Error;

/// Errors produced by the git adapter and its utilities.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    /// `git` ran (or failed to start) and reported failure. The captured
    /// output is kept in `result`.
    #[error("{operation} failed: {message}")]
    ExecutionFailure {
        operation: Operation,
        message: String,
        result: Box<OperationResult>,
    },

    #[error("{operation} failed: could not create directory '{path}': {source}")]
    FilesystemFailure {
        operation: Operation,
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} is not installed or not in PATH: {message}")]
    ToolUnavailable { program: String, message: String },

    #[error("not a git repository (or any of the parent directories): {path}")]
    NotARepository { path: String },

    #[error("{operation} failed: {reason}")]
    Cancelled {
        operation: Operation,
        reason: Interrupted,
    },
}

impl GitError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        GitError::InvalidRequest {
            message: message.into(),
        }
    }

    /// The partially populated result of a failed invocation, if any.
    pub fn result(&self) -> Option<&OperationResult> {
        match self {
            GitError::ExecutionFailure { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn operation(&self) -> Option<Operation> {
        match self {
            GitError::ExecutionFailure { operation, .. }
            | GitError::FilesystemFailure { operation, .. }
            | GitError::Cancelled { operation, .. } => Some(*operation),
            _ => None,
        }
    }
}

pub type GitResult<T> = Result<T, GitError>;
