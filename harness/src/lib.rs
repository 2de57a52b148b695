pub mod config;
pub mod context;
pub mod git;
pub mod tools;

pub use config::{AdapterConfig, ConfigError, ConfigResult};
pub use context::{ExecutionContext, Interrupted};
pub use git::{
    Execution, FileSelection, GitAdapter, GitError, GitRequest, GitResult, GitTool, LogOptions,
    Operation, OperationResult,
};
pub use tools::{Tool, ToolError, ToolOutput, ToolRegistry, ToolResult};
