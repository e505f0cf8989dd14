use crate::commands::open_current_repo;
use crate::core::{
    error::{GitStewardError, Result},
    print_info, print_success,
    status_loader::LoadStatusOpts,
};

pub fn execute_stage(all: bool, paths: Vec<String>) -> Result<()> {
    let git_repo = open_current_repo()?;
    let worktree = git_repo.worktree()?;

    if all {
        worktree.stage_all()?;
        print_success("Staged all changes");
        return Ok(());
    }
    if paths.is_empty() {
        print_info("Nothing to stage. Pass paths or --all.");
        return Ok(());
    }

    for path in &paths {
        worktree.stage_file(path)?;
    }
    print_success(&format!("Staged {} path(s)", paths.len()));
    Ok(())
}

/// Unstage paths. Files with history are reset against HEAD; newly added
/// files are dropped from the index instead.
pub fn execute_unstage(all: bool, paths: Vec<String>) -> Result<()> {
    let git_repo = open_current_repo()?;
    let worktree = git_repo.worktree()?;

    if all {
        worktree.unstage_all()?;
        print_success("Unstaged all changes");
        return Ok(());
    }
    if paths.is_empty() {
        print_info("Nothing to unstage. Pass paths or --all.");
        return Ok(());
    }

    let files = git_repo.load_status_files(LoadStatusOpts::default())?;
    for path in &paths {
        let file = files
            .iter()
            .find(|f| f.name() == path.as_str())
            .ok_or_else(|| GitStewardError::NoChangesAtPath { path: path.clone() })?;
        worktree.unstage_file(&file.names(), file.is_tracked())?;
    }

    print_success(&format!("Unstaged {} path(s)", paths.len()));
    Ok(())
}

pub fn execute_ignore(pattern: &str) -> Result<()> {
    let git_repo = open_current_repo()?;
    git_repo.worktree()?.ignore(pattern)?;

    print_success(&format!("Added '{pattern}' to .gitignore"));
    Ok(())
}
