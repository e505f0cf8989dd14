//! Core functionality for the git-steward tool.
//!
//! This module holds the decision layer: repository state detection, the discard
//! engine, submodule orchestration, and the seams (command execution, status
//! loading) they are built on.

pub mod cmd;
pub mod config;
pub mod dirs;
pub mod editor;
pub mod error;
pub mod file_change;
pub mod file_tree;
pub mod git;
pub mod os;
pub mod output;
pub mod repo_state;
pub mod short_status;
pub mod status_loader;
pub mod submodules;
pub mod worktree;

#[cfg(test)]
pub(crate) mod testing;

// === Error handling ===
pub use error::{GitStewardError, Result};

// === Command execution ===
// Operation descriptions and the runner that executes them
pub use cmd::{CmdObj, CommandFailure, CommandRunner, FailureReason, GitCommandRunner};

// === Repository ===
pub use git::GitRepo;
pub use repo_state::{RepositoryState, StatusClassifier};

// === Change records ===
// Two-character status codes and the per-file record derived from them
pub use file_change::FileChange;
pub use file_tree::FileNode;
pub use short_status::{ConflictKind, ShortStatus, StatusCode};
pub use status_loader::{LoadStatusOpts, PorcelainStatusLoader, StatusLoader};

// === Operations ===
pub use submodules::{SubmoduleConfig, SubmoduleManager};
pub use worktree::{discard_steps, DiscardStep, ResetStrength, WorktreeManager};

// === Configuration ===
pub use config::UserConfig;

// === Output formatting ===
pub use output::{print_error, print_info, print_section_header, print_success};
