//! Argument vectors for each operation.

use super::request::{FileSelection, GitRequest};
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::Path;

/// One external command: program plus arguments, nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: OsString,
    pub args: Vec<OsString>,
}

impl Invocation {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    /// Arguments as strings, lossily converted.
    pub fn args_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.to_string_lossy())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Builds the git command line for `request`, acting on `path`.
///
/// For clone `path` is the clone target; for every other operation it is the
/// repository passed with `-C`.
pub fn build_invocation(program: &str, request: &GitRequest, path: &Path) -> Invocation {
    let git = Invocation::new(program);

    match request {
        GitRequest::Clone { repository, .. } => git.arg("clone").arg(repository).arg(path),
        GitRequest::Status { .. } => in_repo(git, path).arg("status"),
        GitRequest::Log { options, .. } => {
            let mut git = in_repo(git, path).arg("log");
            if let Some(limit) = options.limit {
                git = git.arg(format!("-n{}", limit));
            }
            if options.oneline {
                git = git.arg("--oneline");
            }
            git
        }
        GitRequest::Diff { cached, .. } => {
            let git = in_repo(git, path).arg("diff");
            if *cached {
                git.arg("--cached")
            } else {
                git
            }
        }
        GitRequest::Add { files, .. } => {
            let git = in_repo(git, path).arg("add");
            match files {
                FileSelection::All => git.arg("."),
                FileSelection::Paths(paths) => git.args(paths),
            }
        }
        GitRequest::Commit { message, .. } => in_repo(git, path).args(["commit", "-m"]).arg(message),
        GitRequest::Push { .. } => in_repo(git, path).arg("push"),
        GitRequest::Pull { .. } => in_repo(git, path).arg("pull"),
        GitRequest::Branch { name, .. } => {
            let git = in_repo(git, path).arg("branch");
            match name.as_deref().filter(|n| !n.is_empty()) {
                Some(name) => git.arg(name),
                None => git,
            }
        }
        GitRequest::Checkout { branch, .. } => in_repo(git, path).arg("checkout").arg(branch),
        GitRequest::Init { .. } => in_repo(git, path).arg("init"),
    }
}

fn in_repo(git: Invocation, path: &Path) -> Invocation {
    git.arg("-C").arg(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::request::LogOptions;

    fn args(request: GitRequest) -> Vec<String> {
        build_invocation("git", &request, Path::new("/repo")).args_lossy()
    }

    #[test]
    fn test_add_names_exactly_the_given_files() {
        let request = GitRequest::add(FileSelection::Paths(vec![
            "one.txt".to_string(),
            "two.txt".to_string(),
        ]));
        assert_eq!(args(request), ["-C", "/repo", "add", "one.txt", "two.txt"]);
    }

    #[test]
    fn test_add_defaults_to_everything() {
        assert_eq!(
            args(GitRequest::add(FileSelection::All)),
            ["-C", "/repo", "add", "."]
        );
    }

    #[test]
    fn test_clone_uses_target_positionally() {
        let invocation = build_invocation(
            "git",
            &GitRequest::clone_repo("https://example.com/r.git"),
            Path::new("/dest/r"),
        );
        assert_eq!(invocation.program, OsString::from("git"));
        assert_eq!(
            invocation.args_lossy(),
            ["clone", "https://example.com/r.git", "/dest/r"]
        );
    }

    #[test]
    fn test_log_options() {
        assert_eq!(args(GitRequest::log(LogOptions::default())), ["-C", "/repo", "log"]);
        assert_eq!(
            args(GitRequest::log(LogOptions {
                limit: Some(3),
                oneline: true
            })),
            ["-C", "/repo", "log", "-n3", "--oneline"]
        );
    }

    #[test]
    fn test_fractional_log_limit_is_truncated() {
        let request = GitRequest::from_args(&serde_json::json!({
            "operation": "log",
            "options": { "limit": 0.5 }
        }))
        .unwrap();
        assert_eq!(args(request), ["-C", "/repo", "log", "-n0"]);
    }

    #[test]
    fn test_diff_cached() {
        assert_eq!(args(GitRequest::diff(false)), ["-C", "/repo", "diff"]);
        assert_eq!(args(GitRequest::diff(true)), ["-C", "/repo", "diff", "--cached"]);
    }

    #[test]
    fn test_simple_operations() {
        assert_eq!(args(GitRequest::status()), ["-C", "/repo", "status"]);
        assert_eq!(args(GitRequest::push()), ["-C", "/repo", "push"]);
        assert_eq!(args(GitRequest::pull()), ["-C", "/repo", "pull"]);
        assert_eq!(args(GitRequest::init()), ["-C", "/repo", "init"]);
    }

    #[test]
    fn test_commit_message_is_one_argument() {
        assert_eq!(
            args(GitRequest::commit("fix: handle spaces; and quotes'")),
            ["-C", "/repo", "commit", "-m", "fix: handle spaces; and quotes'"]
        );
    }

    #[test]
    fn test_branch_and_checkout() {
        assert_eq!(args(GitRequest::branch(None)), ["-C", "/repo", "branch"]);
        assert_eq!(
            args(GitRequest::branch(Some("topic".to_string()))),
            ["-C", "/repo", "branch", "topic"]
        );
        assert_eq!(
            args(GitRequest::checkout("topic")),
            ["-C", "/repo", "checkout", "topic"]
        );
    }

    #[test]
    fn test_display_joins_program_and_args() {
        let invocation = build_invocation("git", &GitRequest::status(), Path::new("/repo"));
        assert_eq!(invocation.to_string(), "git -C /repo status");
    }
}
