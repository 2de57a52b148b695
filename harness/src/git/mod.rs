//! Git operations as a single callable entry point.
//!
//! A caller names one of a fixed set of operations, supplies its arguments and
//! gets back an [`OperationResult`] plus a short text summary. The work itself
//! is done by the external `git` executable.
//!
//! ```no_run
//! use harness::config::AdapterConfig;
//! use harness::context::ExecutionContext;
//! use harness::git::*;
//!
//! # async fn run() -> Result<(), GitError> {
//! let git = GitAdapter::new(AdapterConfig::new("/path/to/repo"));
//! let ctx = ExecutionContext::new().with_timeout(std::time::Duration::from_secs(30));
//!
//! let execution = git
//!     .execute(&ctx, &GitRequest::log(LogOptions { limit: Some(5), oneline: true }))
//!     .await?;
//! println!("{}", execution.summary);
//! # Ok(())
//! # }
//! ```
//!
//! Tool callers go through [`GitTool`], which accepts the JSON argument bag
//! described by its [`crate::tools::Tool::definition`].

pub mod adapter;
pub mod command;
pub mod error;
pub mod path;
pub mod repository;
pub mod request;
pub mod runner;
pub mod tool;
pub mod types;

pub use adapter::{summarize, Execution, GitAdapter};
pub use command::{build_invocation, Invocation};
pub use error::{GitError, GitResult};
pub use path::{clean_path, clone_target, resolve_path};
pub use repository::{check_tool_available, find_root, is_repository, sanitize_url};
pub use request::{FileSelection, GitRequest, LogOptions};
pub use runner::{CommandOutput, CommandRunner, ProcessRunner};
pub use tool::{GitTool, GIT_TOOL_NAME};
pub use types::{Operation, OperationResult};
