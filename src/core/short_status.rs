//! Type-safe two-character status codes.
//!
//! `git status --porcelain` reports every path with a two-character code: the
//! first character describes the index, the second the working tree. This module
//! parses that code into [`ShortStatus`] so callers branch on enum variants instead
//! of string comparisons.
//!
//! # Public API
//! - [`StatusCode`]: one side (index or worktree) of a status code
//! - [`ShortStatus`]: the full two-character code
//! - [`ConflictKind`]: the seven unmerged combinations

use crate::core::error::{GitStewardError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One character of a porcelain status code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusCode {
    /// No change (' ')
    Unmodified,
    /// Modified (M)
    Modified,
    /// Type changed (T)
    TypeChanged,
    /// Added (A)
    Added,
    /// Deleted (D)
    Deleted,
    /// Renamed (R)
    Renamed,
    /// Copied (C)
    Copied,
    /// Updated but unmerged (U)
    Unmerged,
    /// Untracked (?)
    Untracked,
    /// Ignored (!)
    Ignored,
}

impl StatusCode {
    pub fn from_char(c: char) -> Option<Self> {
        let code = match c {
            ' ' => StatusCode::Unmodified,
            'M' => StatusCode::Modified,
            'T' => StatusCode::TypeChanged,
            'A' => StatusCode::Added,
            'D' => StatusCode::Deleted,
            'R' => StatusCode::Renamed,
            'C' => StatusCode::Copied,
            'U' => StatusCode::Unmerged,
            '?' => StatusCode::Untracked,
            '!' => StatusCode::Ignored,
            _ => return None,
        };
        Some(code)
    }

    pub fn as_char(&self) -> char {
        match self {
            StatusCode::Unmodified => ' ',
            StatusCode::Modified => 'M',
            StatusCode::TypeChanged => 'T',
            StatusCode::Added => 'A',
            StatusCode::Deleted => 'D',
            StatusCode::Renamed => 'R',
            StatusCode::Copied => 'C',
            StatusCode::Unmerged => 'U',
            StatusCode::Untracked => '?',
            StatusCode::Ignored => '!',
        }
    }
}

/// The seven unmerged index/worktree combinations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConflictKind {
    /// DD
    BothDeleted,
    /// AU
    AddedByUs,
    /// UD
    DeletedByThem,
    /// UA
    AddedByThem,
    /// DU
    DeletedByUs,
    /// AA
    BothAdded,
    /// UU
    BothModified,
}

impl ConflictKind {
    pub fn description(&self) -> &'static str {
        match self {
            ConflictKind::BothDeleted => "both deleted",
            ConflictKind::AddedByUs => "added by us",
            ConflictKind::DeletedByThem => "deleted by them",
            ConflictKind::AddedByThem => "added by them",
            ConflictKind::DeletedByUs => "deleted by us",
            ConflictKind::BothAdded => "both added",
            ConflictKind::BothModified => "both modified",
        }
    }

    /// Conflicts that leave conflict markers inside the file
    pub fn has_inline_markers(&self) -> bool {
        matches!(self, ConflictKind::BothModified | ConflictKind::BothAdded)
    }
}

/// A parsed two-character porcelain status code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShortStatus {
    pub index: StatusCode,
    pub worktree: StatusCode,
}

impl ShortStatus {
    pub const fn new(index: StatusCode, worktree: StatusCode) -> Self {
        Self { index, worktree }
    }

    /// `??`
    pub fn is_untracked(&self) -> bool {
        self.index == StatusCode::Untracked && self.worktree == StatusCode::Untracked
    }

    pub fn conflict(&self) -> Option<ConflictKind> {
        use StatusCode::*;
        let kind = match (self.index, self.worktree) {
            (Deleted, Deleted) => ConflictKind::BothDeleted,
            (Added, Unmerged) => ConflictKind::AddedByUs,
            (Unmerged, Deleted) => ConflictKind::DeletedByThem,
            (Unmerged, Added) => ConflictKind::AddedByThem,
            (Deleted, Unmerged) => ConflictKind::DeletedByUs,
            (Added, Added) => ConflictKind::BothAdded,
            (Unmerged, Unmerged) => ConflictKind::BothModified,
            _ => return None,
        };
        Some(kind)
    }

    pub fn description(&self) -> &'static str {
        if let Some(conflict) = self.conflict() {
            return conflict.description();
        }
        if self.is_untracked() {
            return "untracked";
        }
        let code = if self.index != StatusCode::Unmodified {
            self.index
        } else {
            self.worktree
        };
        match code {
            StatusCode::Modified => "modified",
            StatusCode::TypeChanged => "type changed",
            StatusCode::Added => "new",
            StatusCode::Deleted => "deleted",
            StatusCode::Renamed => "renamed",
            StatusCode::Copied => "copied",
            StatusCode::Ignored => "ignored",
            StatusCode::Unmerged => "unmerged",
            StatusCode::Untracked => "untracked",
            StatusCode::Unmodified => "unmodified",
        }
    }
}

impl FromStr for ShortStatus {
    type Err = GitStewardError;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(x), Some(y), None) => {
                match (StatusCode::from_char(x), StatusCode::from_char(y)) {
                    (Some(index), Some(worktree)) => Ok(ShortStatus { index, worktree }),
                    _ => Err(GitStewardError::invalid_short_status(s)),
                }
            }
            _ => Err(GitStewardError::invalid_short_status(s)),
        }
    }
}

impl fmt::Display for ShortStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.index.as_char(), self.worktree.as_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(s: &str) -> ShortStatus {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_and_display() {
        for code in ["M ", " M", "AM", "??", "UU", "DU", "R ", " D", "!!"] {
            assert_eq!(status(code).to_string(), code);
        }
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!("".parse::<ShortStatus>().is_err());
        assert!("M".parse::<ShortStatus>().is_err());
        assert!("MMM".parse::<ShortStatus>().is_err());
        assert!("XY".parse::<ShortStatus>().is_err());
    }

    #[test]
    fn test_conflicts() {
        assert_eq!(status("AA").conflict(), Some(ConflictKind::BothAdded));
        assert_eq!(status("DU").conflict(), Some(ConflictKind::DeletedByUs));
        assert_eq!(status("UD").conflict(), Some(ConflictKind::DeletedByThem));
        assert_eq!(status("DD").conflict(), Some(ConflictKind::BothDeleted));
        assert_eq!(status("AU").conflict(), Some(ConflictKind::AddedByUs));
        assert_eq!(status("UA").conflict(), Some(ConflictKind::AddedByThem));
        assert_eq!(status("UU").conflict(), Some(ConflictKind::BothModified));
        assert_eq!(status("MM").conflict(), None);
        assert_eq!(status("A ").conflict(), None);
    }

    #[test]
    fn test_inline_markers() {
        assert!(ConflictKind::BothModified.has_inline_markers());
        assert!(ConflictKind::BothAdded.has_inline_markers());
        assert!(!ConflictKind::DeletedByUs.has_inline_markers());
    }

    #[test]
    fn test_description() {
        assert_eq!(status(" M").description(), "modified");
        assert_eq!(status("A ").description(), "new");
        assert_eq!(status("??").description(), "untracked");
        assert_eq!(status("UU").description(), "both modified");
        assert_eq!(status("R ").description(), "renamed");
    }
}
