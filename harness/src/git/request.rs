//! Typed requests, one variant per operation.
//!
//! Callers either build a [`GitRequest`] directly or convert the loosely-typed
//! JSON argument bag with [`GitRequest::from_args`]. Required fields are
//! checked by [`GitRequest::validate`], which the adapter runs again before any
//! handler so that directly-built requests get the same guarantees.

use super::error::{GitError, GitResult};
use super::types::Operation;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Options accepted by `log`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogOptions {
    /// Maximum number of entries, emitted as `-n<limit>`.
    pub limit: Option<u64>,
    /// One line per entry.
    pub oneline: bool,
}

/// Which files `add` stages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FileSelection {
    #[default]
    All,
    Paths(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitRequest {
    Clone {
        repository: String,
        path: Option<PathBuf>,
    },
    Status {
        path: Option<PathBuf>,
    },
    Log {
        path: Option<PathBuf>,
        options: LogOptions,
    },
    Diff {
        path: Option<PathBuf>,
        cached: bool,
    },
    Add {
        path: Option<PathBuf>,
        files: FileSelection,
    },
    Commit {
        path: Option<PathBuf>,
        message: String,
    },
    Push {
        path: Option<PathBuf>,
    },
    Pull {
        path: Option<PathBuf>,
    },
    Branch {
        path: Option<PathBuf>,
        name: Option<String>,
    },
    Checkout {
        path: Option<PathBuf>,
        branch: String,
    },
    Init {
        path: Option<PathBuf>,
    },
}

impl GitRequest {
    pub fn clone_repo(repository: impl Into<String>) -> Self {
        GitRequest::Clone {
            repository: repository.into(),
            path: None,
        }
    }

    pub fn status() -> Self {
        GitRequest::Status { path: None }
    }

    pub fn log(options: LogOptions) -> Self {
        GitRequest::Log {
            path: None,
            options,
        }
    }

    pub fn diff(cached: bool) -> Self {
        GitRequest::Diff { path: None, cached }
    }

    pub fn add(files: FileSelection) -> Self {
        GitRequest::Add { path: None, files }
    }

    pub fn commit(message: impl Into<String>) -> Self {
        GitRequest::Commit {
            path: None,
            message: message.into(),
        }
    }

    pub fn push() -> Self {
        GitRequest::Push { path: None }
    }

    pub fn pull() -> Self {
        GitRequest::Pull { path: None }
    }

    pub fn branch(name: Option<String>) -> Self {
        GitRequest::Branch { path: None, name }
    }

    pub fn checkout(branch: impl Into<String>) -> Self {
        GitRequest::Checkout {
            path: None,
            branch: branch.into(),
        }
    }

    pub fn init() -> Self {
        GitRequest::Init { path: None }
    }

    /// Sets the explicit repository (or target) path.
    pub fn at(mut self, path: impl Into<PathBuf>) -> Self {
        let path = Some(path.into());
        match &mut self {
            GitRequest::Clone { path: p, .. }
            | GitRequest::Status { path: p }
            | GitRequest::Log { path: p, .. }
            | GitRequest::Diff { path: p, .. }
            | GitRequest::Add { path: p, .. }
            | GitRequest::Commit { path: p, .. }
            | GitRequest::Push { path: p }
            | GitRequest::Pull { path: p }
            | GitRequest::Branch { path: p, .. }
            | GitRequest::Checkout { path: p, .. }
            | GitRequest::Init { path: p } => *p = path,
        }
        self
    }

    pub fn operation(&self) -> Operation {
        match self {
            GitRequest::Clone { .. } => Operation::Clone,
            GitRequest::Status { .. } => Operation::Status,
            GitRequest::Log { .. } => Operation::Log,
            GitRequest::Diff { .. } => Operation::Diff,
            GitRequest::Add { .. } => Operation::Add,
            GitRequest::Commit { .. } => Operation::Commit,
            GitRequest::Push { .. } => Operation::Push,
            GitRequest::Pull { .. } => Operation::Pull,
            GitRequest::Branch { .. } => Operation::Branch,
            GitRequest::Checkout { .. } => Operation::Checkout,
            GitRequest::Init { .. } => Operation::Init,
        }
    }

    /// Explicit path, if one was given and is non-empty.
    pub fn path(&self) -> Option<&Path> {
        let path = match self {
            GitRequest::Clone { path, .. }
            | GitRequest::Status { path }
            | GitRequest::Log { path, .. }
            | GitRequest::Diff { path, .. }
            | GitRequest::Add { path, .. }
            | GitRequest::Commit { path, .. }
            | GitRequest::Push { path }
            | GitRequest::Pull { path }
            | GitRequest::Branch { path, .. }
            | GitRequest::Checkout { path, .. }
            | GitRequest::Init { path } => path,
        };
        path.as_deref().filter(|p| !p.as_os_str().is_empty())
    }

    pub fn validate(&self) -> GitResult<()> {
        match self {
            GitRequest::Clone { repository, .. } if repository.is_empty() => Err(
                GitError::invalid("repository URL is required for clone operation"),
            ),
            GitRequest::Commit { message, .. } if message.is_empty() => {
                Err(GitError::invalid("commit message is required"))
            }
            GitRequest::Checkout { branch, .. } if branch.is_empty() => Err(GitError::invalid(
                "branch name is required for checkout operation",
            )),
            _ => Ok(()),
        }
    }

    /// Converts the JSON argument bag used by tool callers.
    ///
    /// Recognised keys: `operation` (required), `path`, `repository`,
    /// `message`, `branch`, `files` and `options` (`limit`, `oneline`,
    /// `cached`). Optional fields of the wrong JSON type are ignored, except
    /// `files`, which must be an array or a string.
    pub fn from_args(args: &Value) -> GitResult<Self> {
        let operation = args
            .get("operation")
            .and_then(Value::as_str)
            .ok_or_else(|| GitError::invalid("operation parameter is required"))?;
        let operation = operation
            .parse::<Operation>()
            .map_err(GitError::invalid)?;

        let path = string_arg(args, "path").map(PathBuf::from);
        let options = args.get("options").and_then(Value::as_object);
        let flag = |name: &str| {
            options
                .and_then(|o| o.get(name))
                .and_then(Value::as_bool)
                .unwrap_or(false)
        };

        let request = match operation {
            Operation::Clone => GitRequest::Clone {
                repository: string_arg(args, "repository").unwrap_or_default().to_string(),
                path,
            },
            Operation::Status => GitRequest::Status { path },
            Operation::Log => GitRequest::Log {
                path,
                options: LogOptions {
                    limit: options
                        .and_then(|o| o.get("limit"))
                        .and_then(Value::as_f64)
                        .filter(|limit| *limit > 0.0)
                        .map(|limit| limit as u64),
                    oneline: flag("oneline"),
                },
            },
            Operation::Diff => GitRequest::Diff {
                path,
                cached: flag("cached"),
            },
            Operation::Add => GitRequest::Add {
                path,
                files: file_selection(args)?,
            },
            Operation::Commit => GitRequest::Commit {
                path,
                message: string_arg(args, "message").unwrap_or_default().to_string(),
            },
            Operation::Push => GitRequest::Push { path },
            Operation::Pull => GitRequest::Pull { path },
            Operation::Branch => GitRequest::Branch {
                path,
                name: string_arg(args, "branch").map(str::to_string),
            },
            Operation::Checkout => GitRequest::Checkout {
                path,
                branch: string_arg(args, "branch").unwrap_or_default().to_string(),
            },
            Operation::Init => GitRequest::Init { path },
        };

        request.validate()?;
        Ok(request)
    }
}

fn string_arg<'a>(args: &'a Value, key: &str) -> Option<&'a str> {
    args.get(key)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
}

fn file_selection(args: &Value) -> GitResult<FileSelection> {
    match args.get("files") {
        None => Ok(FileSelection::All),
        Some(Value::Array(items)) => Ok(FileSelection::Paths(
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
        )),
        Some(Value::String(file)) => Ok(FileSelection::Paths(vec![file.clone()])),
        Some(other) => Err(GitError::invalid(format!(
            "invalid files parameter type: expected array of strings or string, got {}",
            json_type(other)
        ))),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn invalid(args: Value) -> String {
        match GitRequest::from_args(&args) {
            Err(GitError::InvalidRequest { message }) => message,
            other => panic!("expected InvalidRequest, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_operation() {
        assert!(invalid(json!({})).contains("operation parameter is required"));
        assert!(invalid(json!({ "operation": 7 })).contains("required"));
    }

    #[test]
    fn test_unrecognized_operations_rejected() {
        for name in ["invalid_operation", "STATUS", "Commit", "stash", "rebase", ""] {
            invalid(json!({ "operation": name }));
        }
    }

    #[test]
    fn test_required_fields() {
        assert!(invalid(json!({ "operation": "clone" })).contains("repository URL"));
        assert!(invalid(json!({ "operation": "clone", "repository": "" })).contains("clone"));
        assert!(invalid(json!({ "operation": "commit", "message": "" })).contains("message"));
        assert!(invalid(json!({ "operation": "commit", "message": 12 })).contains("message"));
        assert!(invalid(json!({ "operation": "checkout" })).contains("branch name"));
        assert!(invalid(json!({ "operation": "checkout", "branch": "" })).contains("checkout"));
    }

    #[test]
    fn test_typed_constructors_validate_the_same_way() {
        assert!(GitRequest::clone_repo("").validate().is_err());
        assert!(GitRequest::commit("").validate().is_err());
        assert!(GitRequest::checkout("").validate().is_err());
        assert!(GitRequest::checkout("main").validate().is_ok());
        assert!(GitRequest::branch(None).validate().is_ok());
    }

    #[test]
    fn test_files_shapes() {
        let list = GitRequest::from_args(&json!({
            "operation": "add",
            "files": ["a.txt", 3, "b.txt"]
        }))
        .unwrap();
        assert_eq!(
            list,
            GitRequest::add(FileSelection::Paths(vec![
                "a.txt".to_string(),
                "b.txt".to_string()
            ]))
        );

        let single = GitRequest::from_args(&json!({ "operation": "add", "files": "c.txt" })).unwrap();
        assert_eq!(
            single,
            GitRequest::add(FileSelection::Paths(vec!["c.txt".to_string()]))
        );

        let all = GitRequest::from_args(&json!({ "operation": "add" })).unwrap();
        assert_eq!(all, GitRequest::add(FileSelection::All));

        for bad in [json!(42), json!({ "x": 1 }), json!(true), Value::Null] {
            let message = invalid(json!({ "operation": "add", "files": bad }));
            assert!(message.contains("invalid files parameter type"));
        }
    }

    #[test]
    fn test_log_options() {
        let request = GitRequest::from_args(&json!({
            "operation": "log",
            "options": { "limit": 5, "oneline": true }
        }))
        .unwrap();
        assert_eq!(
            request,
            GitRequest::log(LogOptions {
                limit: Some(5),
                oneline: true
            })
        );

        let truncated = GitRequest::from_args(&json!({
            "operation": "log",
            "options": { "limit": 2.9 }
        }))
        .unwrap();
        assert_eq!(
            truncated,
            GitRequest::log(LogOptions {
                limit: Some(2),
                oneline: false
            })
        );

        let fractional = GitRequest::from_args(&json!({
            "operation": "log",
            "options": { "limit": 0.5 }
        }))
        .unwrap();
        assert_eq!(
            fractional,
            GitRequest::log(LogOptions {
                limit: Some(0),
                oneline: false
            })
        );

        for ignored in [json!(0), json!(-3), json!("10"), json!(null)] {
            let request = GitRequest::from_args(&json!({
                "operation": "log",
                "options": { "limit": ignored, "oneline": "yes" }
            }))
            .unwrap();
            assert_eq!(request, GitRequest::log(LogOptions::default()));
        }
    }

    #[test]
    fn test_diff_cached_flag() {
        let staged =
            GitRequest::from_args(&json!({ "operation": "diff", "options": { "cached": true } }))
                .unwrap();
        assert_eq!(staged, GitRequest::diff(true));

        let plain = GitRequest::from_args(&json!({ "operation": "diff", "options": "cached" }))
            .unwrap();
        assert_eq!(plain, GitRequest::diff(false));
    }

    #[test]
    fn test_path_and_branch_extraction() {
        let request = GitRequest::from_args(&json!({
            "operation": "branch",
            "path": "/tmp/repo",
            "branch": "feature"
        }))
        .unwrap();
        assert_eq!(request.path(), Some(Path::new("/tmp/repo")));
        assert_eq!(
            request,
            GitRequest::branch(Some("feature".to_string())).at("/tmp/repo")
        );

        let listing = GitRequest::from_args(&json!({
            "operation": "branch",
            "path": "",
            "branch": ""
        }))
        .unwrap();
        assert_eq!(listing.path(), None);
        assert_eq!(listing, GitRequest::branch(None));
    }

    #[test]
    fn test_empty_explicit_path_is_absent() {
        let request = GitRequest::status().at("");
        assert_eq!(request.path(), None);
        assert_eq!(request.operation(), Operation::Status);
    }
}
