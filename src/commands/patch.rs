use crate::commands::open_current_repo;
use crate::core::{error::Result, print_success};
use std::fs;
use std::path::Path;

/// Apply the patch stored in `patch_file`, passing each flag as `--<flag>`
pub fn execute_apply_patch(patch_file: &Path, flags: Vec<String>) -> Result<()> {
    let patch = fs::read_to_string(patch_file)?;

    let git_repo = open_current_repo()?;
    let flags: Vec<&str> = flags.iter().map(String::as_str).collect();
    let scratch = git_repo.worktree()?.apply_patch(&patch, &flags)?;

    print_success(&format!("Applied patch (saved to {})", scratch.display()));
    Ok(())
}
