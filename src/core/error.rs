//! Domain-specific error types and error handling utilities.
//!
//! This module defines [`GitStewardError`] which covers every failure the decision
//! engine can report. It uses `thiserror` for ergonomic error definitions and
//! includes constructor helpers for the variants that carry context.
//!
//! # Public API
//! - [`GitStewardError`]: Main error enum covering all failure modes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, GitStewardError>`
//!
//! # Error Categories
//! - **Repository**: not a repository, bare repository, git2 library errors
//! - **External tool**: non-zero exit of a `git` invocation (see [`CommandFailure`])
//! - **Domain preconditions**: rename resolution guards, malformed status codes
//! - **Filesystem**: I/O errors on safety-relevant actions
//! - **Configuration**: no resolvable editor, unreadable config file

use crate::core::cmd::CommandFailure;
use std::path::PathBuf;
use thiserror::Error;

/// Domain-specific error types for git-steward
#[derive(Error, Debug)]
pub enum GitStewardError {
    // Repository errors
    #[error("Not in a git repository")]
    NotInGitRepo,

    #[error("Git repository error: {0}")]
    GitRepo(#[from] git2::Error),

    #[error("Repository has no working tree")]
    NoWorkingTree,

    // External tool errors
    #[error("{0}")]
    CommandFailed(CommandFailure),

    #[error("Failed to start '{command}': {source}")]
    CommandSpawn {
        command: String,
        source: std::io::Error,
    },

    // Domain precondition errors
    #[error("Expected renamed file, got '{name}'")]
    ExpectedRename { name: String },

    #[error("Could not find deleted file or new file for rename of '{previous}' to '{name}'")]
    RenameCounterpartMissing { previous: String, name: String },

    #[error("Found {count} status entries named '{name}' while resolving a rename")]
    AmbiguousRenameCounterpart { name: String, count: usize },

    #[error("Nested rename found for '{name}'")]
    NestedRename { name: String },

    #[error("Rename resolution for '{name}' exceeded depth {max_depth}")]
    RenameDepthExceeded { name: String, max_depth: usize },

    #[error("Invalid short status '{status}'")]
    InvalidShortStatus { status: String },

    #[error("Malformed status output: {message}")]
    MalformedStatusOutput { message: String },

    #[error("Submodule '{name}' has no path configured")]
    SubmodulePathMissing { name: String },

    #[error("No submodule named '{name}' in .gitmodules")]
    SubmoduleNotFound { name: String },

    #[error("No file or directory with changes at '{path}'")]
    NoChangesAtPath { path: String },

    // File operation errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to remove '{path}': {source}")]
    RemoveFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    // Configuration errors
    #[error("No editor defined in config file, $GIT_EDITOR, $VISUAL, $EDITOR, or git config")]
    NoEditorConfigured,

    #[error("Could not find config directory")]
    ConfigDirectoryNotFound,

    #[error("Failed to parse config file '{path}': {source}")]
    ConfigParseFailed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results using GitStewardError
pub type Result<T> = std::result::Result<T, GitStewardError>;

impl GitStewardError {
    /// Create an expected-rename error for a record that is not a rename
    pub fn expected_rename(name: impl Into<String>) -> Self {
        Self::ExpectedRename { name: name.into() }
    }

    /// Create an error for a rename whose before or after file is missing
    pub fn rename_counterpart_missing(previous: impl Into<String>, name: impl Into<String>) -> Self {
        Self::RenameCounterpartMissing {
            previous: previous.into(),
            name: name.into(),
        }
    }

    /// Create a nested rename error
    pub fn nested_rename(name: impl Into<String>) -> Self {
        Self::NestedRename { name: name.into() }
    }

    /// Create an invalid short status error
    pub fn invalid_short_status(status: impl Into<String>) -> Self {
        Self::InvalidShortStatus {
            status: status.into(),
        }
    }

    /// Create a malformed status output error
    pub fn malformed_status_output(message: impl Into<String>) -> Self {
        Self::MalformedStatusOutput {
            message: message.into(),
        }
    }

    /// Create a missing submodule path error
    pub fn submodule_path_missing(name: impl Into<String>) -> Self {
        Self::SubmodulePathMissing { name: name.into() }
    }

    /// Create a remove failed error
    pub fn remove_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::RemoveFailed {
            path: path.into(),
            source,
        }
    }

    /// The underlying tool failure, if this error came from a `git` invocation
    pub fn command_failure(&self) -> Option<&CommandFailure> {
        match self {
            Self::CommandFailed(failure) => Some(failure),
            _ => None,
        }
    }
}

impl From<CommandFailure> for GitStewardError {
    fn from(failure: CommandFailure) -> Self {
        Self::CommandFailed(failure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cmd::FailureReason;

    #[test]
    fn test_error_display() {
        let err = GitStewardError::NotInGitRepo;
        assert_eq!(err.to_string(), "Not in a git repository");
    }

    #[test]
    fn test_rename_counterpart_missing() {
        let err = GitStewardError::rename_counterpart_missing("a.txt", "b.txt");
        assert!(err.to_string().contains("a.txt"));
        assert!(err.to_string().contains("b.txt"));
    }

    #[test]
    fn test_nested_rename() {
        let err = GitStewardError::nested_rename("b.txt");
        assert_eq!(err.to_string(), "Nested rename found for 'b.txt'");
    }

    #[test]
    fn test_command_failure_is_exposed() {
        let failure = CommandFailure::new("git rm -- x", Some(1), "fatal: nope");
        let err = GitStewardError::from(failure);
        let inner = err.command_failure().unwrap();
        assert_eq!(inner.code, Some(1));
        assert_eq!(inner.reason(), FailureReason::Other);
        assert!(GitStewardError::NoWorkingTree.command_failure().is_none());
    }

    #[test]
    fn test_remove_failed() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = GitStewardError::remove_failed("/repo/a.txt", io_err);
        assert!(err.to_string().contains("/repo/a.txt"));
        assert!(err.to_string().contains("denied"));
    }
}
