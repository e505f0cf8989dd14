//! The per-file change record.
//!
//! A [`FileChange`] describes one path's position relative to HEAD and the index.
//! All boolean flags are derived from the [`ShortStatus`] at construction time and
//! the fields are private, so the flags and the status code can never disagree.
//! Records are produced fresh by every status listing and are never mutated.

use crate::core::short_status::{ShortStatus, StatusCode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChange {
    name: String,
    previous_name: Option<String>,
    short_status: ShortStatus,
    has_staged_changes: bool,
    has_unstaged_changes: bool,
    has_merge_conflicts: bool,
    has_inline_merge_conflicts: bool,
    tracked: bool,
    added: bool,
    deleted: bool,
}

impl FileChange {
    pub fn new(name: impl Into<String>, previous_name: Option<String>, short_status: ShortStatus) -> Self {
        use StatusCode::*;

        let untracked = matches!(
            (short_status.index, short_status.worktree),
            (Untracked, Untracked) | (Added, Unmodified) | (Added, Modified)
        );
        let conflict = short_status.conflict();

        Self {
            name: name.into(),
            previous_name: previous_name.filter(|p| !p.is_empty()),
            short_status,
            has_staged_changes: !matches!(short_status.index, Unmodified | Unmerged | Untracked),
            has_unstaged_changes: short_status.worktree != Unmodified,
            has_merge_conflicts: conflict.is_some(),
            has_inline_merge_conflicts: conflict.is_some_and(|c| c.has_inline_markers()),
            tracked: !untracked,
            added: short_status.worktree == Added || untracked,
            deleted: short_status.index == Deleted || short_status.worktree == Deleted,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn previous_name(&self) -> Option<&str> {
        self.previous_name.as_deref()
    }

    pub fn short_status(&self) -> ShortStatus {
        self.short_status
    }

    pub fn is_rename(&self) -> bool {
        self.previous_name.is_some()
    }

    pub fn has_staged_changes(&self) -> bool {
        self.has_staged_changes
    }

    pub fn has_unstaged_changes(&self) -> bool {
        self.has_unstaged_changes
    }

    pub fn has_merge_conflicts(&self) -> bool {
        self.has_merge_conflicts
    }

    pub fn has_inline_merge_conflicts(&self) -> bool {
        self.has_inline_merge_conflicts
    }

    pub fn is_tracked(&self) -> bool {
        self.tracked
    }

    /// Untracked, or newly added with no committed content
    pub fn is_added(&self) -> bool {
        self.added
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// Every name this record touches, the pre-image first for renames
    pub fn names(&self) -> Vec<&str> {
        match self.previous_name() {
            Some(previous) => vec![previous, self.name()],
            None => vec![self.name()],
        }
    }
}
