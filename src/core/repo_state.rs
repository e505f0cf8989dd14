//! Coarse repository state detection.
//!
//! The state is derived from marker paths inside the git directory every time it
//! is asked for. Another process (or the user, between two rebase steps) can
//! change the markers at any moment, so nothing here is cached.

use crate::core::os::Os;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Present while `git rebase` runs without `--interactive` (the "apply" backend).
const REBASE_APPLY_MARKER: &str = "rebase-apply";
/// Present while an interactive (or merge-backend) rebase is running.
const REBASE_MERGE_MARKER: &str = "rebase-merge";
const MERGE_HEAD_MARKER: &str = "MERGE_HEAD";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RepositoryState {
    Normal,
    RebasingNonInteractive,
    RebasingInteractive,
    Merging,
}

impl RepositoryState {
    pub fn is_rebasing(&self) -> bool {
        matches!(
            self,
            RepositoryState::RebasingNonInteractive | RepositoryState::RebasingInteractive
        )
    }

    pub fn description(&self) -> &'static str {
        match self {
            RepositoryState::Normal => "normal",
            RepositoryState::RebasingNonInteractive => "rebasing",
            RepositoryState::RebasingInteractive => "rebasing (interactive)",
            RepositoryState::Merging => "merging",
        }
    }
}

impl fmt::Display for RepositoryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Classifies a repository from the markers under its git directory.
#[derive(Debug, Clone)]
pub struct StatusClassifier {
    git_dir: Os,
}

impl StatusClassifier {
    pub fn new(git_dir: impl Into<PathBuf>) -> Self {
        Self {
            git_dir: Os::new(git_dir),
        }
    }

    pub fn git_dir(&self) -> &Path {
        self.git_dir.root()
    }

    /// Rebase markers win over the merge marker; the first match wins.
    pub fn repository_state(&self) -> RepositoryState {
        if self.git_dir_file_exists(REBASE_APPLY_MARKER) {
            RepositoryState::RebasingNonInteractive
        } else if self.git_dir_file_exists(REBASE_MERGE_MARKER) {
            RepositoryState::RebasingInteractive
        } else if self.git_dir_file_exists(MERGE_HEAD_MARKER) {
            RepositoryState::Merging
        } else {
            RepositoryState::Normal
        }
    }

    pub fn is_rebasing(&self) -> bool {
        self.repository_state().is_rebasing()
    }

    pub fn is_merging(&self) -> bool {
        self.repository_state() == RepositoryState::Merging
    }

    pub fn in_normal_working_tree_state(&self) -> bool {
        self.repository_state() == RepositoryState::Normal
    }

    fn git_dir_file_exists(&self, marker: &str) -> bool {
        match self.git_dir.file_exists(marker) {
            Ok(exists) => exists,
            Err(e) => {
                // treated as absent
                log::error!("could not check for {marker}: {e}");
                false
            }
        }
    }
}
