//! Loading the per-file status list.
//!
//! The discard engine re-queries the status list when it resolves a rename, so the
//! loader sits behind the [`StatusLoader`] trait. [`PorcelainStatusLoader`] is the
//! real implementation: it runs `git status --porcelain -z` through a
//! [`CommandRunner`] and parses the NUL-separated entries.

use crate::core::{
    cmd::{CmdObj, CommandRunner},
    error::{GitStewardError, Result},
    file_change::FileChange,
    short_status::{ShortStatus, StatusCode},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStatusOpts {
    /// Report renames as a deletion plus an addition
    pub no_renames: bool,
}

pub trait StatusLoader {
    fn load_status_files(&self, opts: LoadStatusOpts) -> Result<Vec<FileChange>>;
}

pub struct PorcelainStatusLoader<R> {
    runner: R,
}

impl<R: CommandRunner> PorcelainStatusLoader<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    pub fn status_cmd_obj(opts: LoadStatusOpts) -> CmdObj {
        let mut args = vec!["status", "--untracked-files=all", "--porcelain", "-z"];
        if opts.no_renames {
            args.push("--no-renames");
        }
        CmdObj::git(args)
    }
}

impl<R: CommandRunner> StatusLoader for PorcelainStatusLoader<R> {
    fn load_status_files(&self, opts: LoadStatusOpts) -> Result<Vec<FileChange>> {
        let output = self.runner.run_with_output(&Self::status_cmd_obj(opts))?;
        let files = parse_porcelain_z(&output)?;
        log::debug!("loaded {} status entries (no_renames: {})", files.len(), opts.no_renames);
        Ok(files)
    }
}

/// Parse `git status --porcelain -z` output into change records
pub fn parse_porcelain_z(output: &str) -> Result<Vec<FileChange>> {
    let mut files = Vec::new();
    let mut fields = output.split('\0').filter(|f| !f.is_empty());

    while let Some(entry) = fields.next() {
        let (code, name) = match (entry.get(..2), entry.get(2..3), entry.get(3..)) {
            (Some(code), Some(" "), Some(name)) if !name.is_empty() => (code, name),
            _ => {
                return Err(GitStewardError::malformed_status_output(format!(
                    "unexpected entry '{entry}'"
                )))
            }
        };
        let short_status: ShortStatus = code.parse()?;

        let copied_or_renamed = |c: StatusCode| matches!(c, StatusCode::Renamed | StatusCode::Copied);
        let previous_name = if copied_or_renamed(short_status.index)
            || copied_or_renamed(short_status.worktree)
        {
            let previous = fields.next().ok_or_else(|| {
                GitStewardError::malformed_status_output(format!("missing original path for '{name}'"))
            })?;
            Some(previous.to_string())
        } else {
            None
        };

        files.push(FileChange::new(name, previous_name, short_status));
    }

    Ok(files)
}
