//! Working tree operations and the discard engine.
//!
//! [`WorktreeManager`] decides which sequence of git operations safely discards or
//! resolves a file's changes. The decision for a single record is the pure
//! function [`discard_steps`]; the manager only executes the steps it returns,
//! stopping at the first failure.
//!
//! # Branch order
//! 1. Renames are split into their before and after files by re-listing the
//!    status without rename detection, and each half is discarded on its own.
//! 2. `AA` (both added): check out our side, then stage it.
//! 3. `DU` (deleted by us): remove the file, nothing else.
//! 4. Staged changes or conflicts: unstage first.
//! 5. `DD` / `AU`: unstaging was all that was needed.
//! 6. Added or untracked files: delete from disk.
//! 7. Anything else: check the file out from the index.
//!
//! The order matters: unstaging an `AA` or `DU` entry before resolving it would
//! leave the conflict in a state the later steps cannot handle.

use crate::core::{
    cmd::{CmdObj, CommandRunner},
    config::UserConfig,
    editor,
    error::{GitStewardError, Result},
    file_change::FileChange,
    file_tree::FileNode,
    os::Os,
    short_status::ConflictKind,
    status_loader::{LoadStatusOpts, StatusLoader},
    submodules::SubmoduleManager,
};
use chrono::Local;
use std::path::{Path, PathBuf};

/// Renames resolve into two non-rename records, so one level is all that is valid.
pub const MAX_RENAME_DEPTH: usize = 1;

const GITIGNORE_FILE: &str = ".gitignore";
const PATCH_TIMESTAMP_FORMAT: &str = "%b %e %H.%M.%S%.9f";

/// One operation in a discard sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardStep {
    /// `git checkout --ours -- <file>`
    CheckoutOurs,
    /// `git add -- <file>`
    Stage,
    /// `git rm -- <file>`
    Remove,
    /// `git reset -- <file>`
    Unstage,
    /// Delete the file from disk
    DeleteFromDisk,
    /// `git checkout -- <file>`
    CheckoutFromIndex,
}

/// The steps that discard all changes to a non-rename record, in order
pub fn discard_steps(file: &FileChange) -> Vec<DiscardStep> {
    let conflict = file.short_status().conflict();

    match conflict {
        Some(ConflictKind::BothAdded) => return vec![DiscardStep::CheckoutOurs, DiscardStep::Stage],
        Some(ConflictKind::DeletedByUs) => return vec![DiscardStep::Remove],
        _ => {}
    }

    let mut steps = Vec::with_capacity(2);
    if file.has_staged_changes() || file.has_merge_conflicts() {
        steps.push(DiscardStep::Unstage);
    }

    if matches!(
        conflict,
        Some(ConflictKind::BothDeleted | ConflictKind::AddedByUs)
    ) {
        return steps;
    }

    if file.is_added() {
        steps.push(DiscardStep::DeleteFromDisk);
    } else {
        steps.push(DiscardStep::CheckoutFromIndex);
    }
    steps
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetStrength {
    Soft,
    Mixed,
    Hard,
}

impl ResetStrength {
    pub fn as_flag(&self) -> &'static str {
        match self {
            ResetStrength::Soft => "--soft",
            ResetStrength::Mixed => "--mixed",
            ResetStrength::Hard => "--hard",
        }
    }
}

pub struct WorktreeManager<'a> {
    runner: &'a dyn CommandRunner,
    loader: &'a dyn StatusLoader,
    worktree: Os,
    git_dir: PathBuf,
    scratch_dir: PathBuf,
}

impl<'a> WorktreeManager<'a> {
    pub fn new(
        runner: &'a dyn CommandRunner,
        loader: &'a dyn StatusLoader,
        workdir: impl Into<PathBuf>,
        git_dir: impl Into<PathBuf>,
        scratch_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            runner,
            loader,
            worktree: Os::new(workdir),
            git_dir: git_dir.into(),
            scratch_dir: scratch_dir.into(),
        }
    }

    pub fn workdir(&self) -> &Path {
        self.worktree.root()
    }

    fn submodules(&self) -> SubmoduleManager<'a> {
        SubmoduleManager::new(self.runner, self.worktree.root(), &self.git_dir)
    }

    pub fn stage_file(&self, file_name: &str) -> Result<()> {
        self.runner.run(&CmdObj::git(["add", "--", file_name]))
    }

    pub fn stage_all(&self) -> Result<()> {
        self.runner.run(&CmdObj::git(["add", "-A"]))
    }

    pub fn unstage_all(&self) -> Result<()> {
        self.runner.run(&CmdObj::git(["reset"]))
    }

    /// Unstage each of `file_names`.
    ///
    /// Files with history are reset against HEAD (`reset = true`); files that
    /// were only ever added are dropped from the index instead.
    pub fn unstage_file(&self, file_names: &[&str], reset: bool) -> Result<()> {
        for &name in file_names {
            let cmd = if reset {
                CmdObj::git(["reset", "HEAD", "--", name])
            } else {
                CmdObj::git(["rm", "--cached", "--force", "--", name])
            };
            self.runner.run(&cmd)?;
        }
        Ok(())
    }

    /// Re-list without rename detection and find both halves of a rename
    pub fn before_and_after_file_for_rename(
        &self,
        file: &FileChange,
    ) -> Result<(FileChange, FileChange)> {
        let previous = file
            .previous_name()
            .ok_or_else(|| GitStewardError::expected_rename(file.name()))?;

        let files = self
            .loader
            .load_status_files(LoadStatusOpts { no_renames: true })?;

        let before = find_unique(&files, previous)?;
        let after = find_unique(&files, file.name())?;
        let (before, after) = match (before, after) {
            (Some(before), Some(after)) => (before, after),
            _ => return Err(GitStewardError::rename_counterpart_missing(previous, file.name())),
        };

        // the re-listing did not honour --no-renames; recursing could loop forever
        if before.is_rename() || after.is_rename() {
            return Err(GitStewardError::nested_rename(file.name()));
        }

        Ok((before.clone(), after.clone()))
    }

    pub fn discard_all_file_changes(&self, file: &FileChange) -> Result<()> {
        self.discard_file(file, 0)
    }

    fn discard_file(&self, file: &FileChange, depth: usize) -> Result<()> {
        if file.is_rename() {
            // backstop for the nested-rename check in the re-listing
            if depth >= MAX_RENAME_DEPTH {
                return Err(GitStewardError::RenameDepthExceeded {
                    name: file.name().to_string(),
                    max_depth: MAX_RENAME_DEPTH,
                });
            }
            let (before, after) = self.before_and_after_file_for_rename(file)?;
            log::debug!(
                "discarding rename {} -> {} as two files",
                before.name(),
                after.name()
            );
            self.discard_file(&before, depth + 1)?;
            return self.discard_file(&after, depth + 1);
        }

        let steps = discard_steps(file);
        log::debug!(
            "discarding {} ({}): {:?}",
            file.name(),
            file.short_status(),
            steps
        );
        for step in steps {
            self.run_step(step, file.name())?;
        }
        Ok(())
    }

    fn run_step(&self, step: DiscardStep, name: &str) -> Result<()> {
        match step {
            DiscardStep::CheckoutOurs => self
                .runner
                .run(&CmdObj::git(["checkout", "--ours", "--", name])),
            DiscardStep::Stage => self.stage_file(name),
            DiscardStep::Remove => self.runner.run(&CmdObj::git(["rm", "--", name])),
            DiscardStep::Unstage => self.runner.run(&CmdObj::git(["reset", "--", name])),
            DiscardStep::DeleteFromDisk => self.worktree.remove_file(name),
            DiscardStep::CheckoutFromIndex => self.checkout_from_index(name),
        }
    }

    /// Discard every file under `node`, stopping at the first failure
    pub fn discard_all_dir_changes(&self, node: &FileNode) -> Result<()> {
        node.for_each_file(|file| self.discard_all_file_changes(file))
    }

    /// Delete untracked files under `node`, then check the whole directory out
    pub fn discard_unstaged_dir_changes(&self, node: &FileNode) -> Result<()> {
        self.remove_untracked_dir_files(node)?;
        self.checkout_from_index(node.path())
    }

    pub fn remove_untracked_dir_files(&self, node: &FileNode) -> Result<()> {
        let untracked =
            node.paths_matching(|n| n.file().is_some_and(|file| !file.is_tracked()));

        for path in untracked {
            self.worktree.remove_file(&path)?;
        }
        Ok(())
    }

    pub fn discard_unstaged_file_changes(&self, file: &FileChange) -> Result<()> {
        self.checkout_from_index(file.name())
    }

    fn checkout_from_index(&self, path: &str) -> Result<()> {
        self.runner.run(&CmdObj::git(["checkout", "--", path]))
    }

    /// Add a pattern to the repository's `.gitignore`
    pub fn ignore(&self, file_name: &str) -> Result<()> {
        self.worktree.append_line_to_file(GITIGNORE_FILE, file_name)
    }

    /// Write `patch` to a timestamped scratch file and `git apply` it.
    ///
    /// Each flag is passed as `--<flag>`. The scratch file is left in place.
    pub fn apply_patch(&self, patch: &str, flags: &[&str]) -> Result<PathBuf> {
        let file_name = format!("{}.patch", Local::now().format(PATCH_TIMESTAMP_FORMAT));
        let path = self.scratch_dir.join(file_name);
        log::info!("saving temporary patch to {}", path.display());
        self.worktree.create_file_with_content(&path, patch)?;

        let mut args = vec!["apply".to_string()];
        args.extend(flags.iter().map(|flag| format!("--{flag}")));
        args.push(path.to_string_lossy().into_owned());
        self.runner.run(&CmdObj::git(args))?;

        Ok(path)
    }

    /// Check out `file_name` as it was at `commit_sha`
    pub fn checkout_file(&self, commit_sha: &str, file_name: &str) -> Result<()> {
        self.runner
            .run(&CmdObj::git(["checkout", commit_sha, "--", file_name]))
    }

    pub fn discard_any_unstaged_file_changes(&self) -> Result<()> {
        self.checkout_from_index(".")
    }

    /// Stop tracking `name` without deleting it from disk
    pub fn remove_tracked_files(&self, name: &str) -> Result<()> {
        self.runner
            .run(&CmdObj::git(["rm", "-r", "--cached", "--", name]))
    }

    pub fn remove_untracked_files(&self) -> Result<()> {
        self.runner.run(&CmdObj::git(["clean", "-fd"]))
    }

    pub fn reset_to_ref(&self, git_ref: &str, strength: ResetStrength, env_vars: &[&str]) -> Result<()> {
        let mut cmd = CmdObj::git(["reset", strength.as_flag(), git_ref]);
        cmd.add_env_vars(env_vars);
        self.runner.run(&cmd)
    }

    /// Stash and reset submodules, hard reset to HEAD, then remove untracked files.
    ///
    /// Every step is fatal; completed steps are not rolled back.
    pub fn reset_and_clean(&self) -> Result<()> {
        let submodules = self.submodules();
        let configs = submodules.get_submodule_configs()?;
        if !configs.is_empty() {
            submodules.reset_submodules(&configs)?;
        }

        self.reset_to_ref("HEAD", ResetStrength::Hard, &[])?;
        self.remove_untracked_files()
    }

    pub fn open_merge_tool_cmd_obj(&self) -> CmdObj {
        CmdObj::git(["mergetool"])
    }

    pub fn edit_file_cmd_obj<E>(&self, file_name: &str, config: &UserConfig, getenv: E) -> Result<CmdObj>
    where
        E: Fn(&str) -> Option<String>,
    {
        editor::edit_file_cmd_obj(self.runner, config, getenv, file_name)
    }
}

fn find_unique<'f>(files: &'f [FileChange], name: &str) -> Result<Option<&'f FileChange>> {
    let mut matches = files.iter().filter(|f| f.name() == name);
    let first = matches.next();
    let extra = matches.count();
    if extra > 0 {
        return Err(GitStewardError::AmbiguousRenameCounterpart {
            name: name.to_string(),
            count: extra + 1,
        });
    }
    Ok(first)
}
