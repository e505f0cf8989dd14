//! Git Steward - the decision layer behind an interactive git client.
//!
//! Given the repository's state and the per-file status reported by git, this
//! library decides which operations must run, in which order, to stage, unstage,
//! discard or reset content and submodules without losing work.
//!
//! # Public API
//! The main public interface is re-exported from the [`core`] module, which provides:
//! - Repository state detection (normal, rebasing, merging)
//! - The discard engine for single files, directories and the whole tree
//! - Submodule lifecycle operations with stash-before-reset safety
//! - Error handling and result types

pub mod commands;
pub mod core;

// Re-export the core public API for external users
pub use core::{
    discard_steps,
    CmdObj,
    CommandFailure,
    CommandRunner,
    ConflictKind,
    DiscardStep,
    FailureReason,
    FileChange,
    FileNode,
    GitCommandRunner,
    GitRepo,
    GitStewardError,
    LoadStatusOpts,
    PorcelainStatusLoader,
    RepositoryState,
    ResetStrength,
    Result,
    ShortStatus,
    StatusClassifier,
    StatusCode,
    StatusLoader,
    SubmoduleConfig,
    SubmoduleManager,
    UserConfig,
    WorktreeManager,
};
