//! Operation names and the result record returned for every call.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// The fixed set of supported git operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Clone,
    Status,
    Log,
    Diff,
    Add,
    Commit,
    Push,
    Pull,
    Branch,
    Checkout,
    Init,
}

impl Operation {
    pub const ALL: [Operation; 11] = [
        Operation::Clone,
        Operation::Status,
        Operation::Log,
        Operation::Diff,
        Operation::Add,
        Operation::Commit,
        Operation::Push,
        Operation::Pull,
        Operation::Branch,
        Operation::Checkout,
        Operation::Init,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Clone => "clone",
            Operation::Status => "status",
            Operation::Log => "log",
            Operation::Diff => "diff",
            Operation::Add => "add",
            Operation::Commit => "commit",
            Operation::Push => "push",
            Operation::Pull => "pull",
            Operation::Branch => "branch",
            Operation::Checkout => "checkout",
            Operation::Init => "init",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact, case-sensitive match against [`Operation::ALL`].
impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| format!("unsupported operation: {}", s))
    }
}

/// Outcome of a single operation.
///
/// Built once by the handler and handed to the caller; fields are read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationResult {
    operation: Operation,
    output: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    path: Option<PathBuf>,
}

impl OperationResult {
    pub(crate) fn new(
        operation: Operation,
        output: String,
        error: Option<String>,
        path: PathBuf,
    ) -> Self {
        Self {
            operation,
            output,
            error,
            path: Some(path),
        }
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// Combined stdout and stderr of the git invocation.
    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_parse_exact_match() {
        for op in Operation::ALL {
            assert_eq!(op.as_str().parse::<Operation>(), Ok(op));
        }
        assert!("Status".parse::<Operation>().is_err());
        assert!("stat".parse::<Operation>().is_err());
        assert!(" status".parse::<Operation>().is_err());
        assert!("".parse::<Operation>().is_err());
    }

    #[test]
    fn test_operation_serializes_lowercase() {
        let json = serde_json::to_string(&Operation::Checkout).unwrap();
        assert_eq!(json, "\"checkout\"");
    }

    #[test]
    fn test_result_serialization_omits_empty_error() {
        let result = OperationResult::new(
            Operation::Status,
            "On branch main\n".to_string(),
            None,
            PathBuf::from("/repo"),
        );
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["operation"], "status");
        assert_eq!(value["output"], "On branch main\n");
        assert_eq!(value["path"], "/repo");
        assert!(value.get("error").is_none());
        assert!(result.is_success());
    }

    #[test]
    fn test_result_accessors_with_error() {
        let result = OperationResult::new(
            Operation::Diff,
            String::new(),
            Some("exit status: 128".to_string()),
            PathBuf::from("/repo"),
        );
        assert_eq!(result.operation(), Operation::Diff);
        assert_eq!(result.error(), Some("exit status: 128"));
        assert_eq!(result.path(), Some(Path::new("/repo")));
        assert!(!result.is_success());
    }
}
