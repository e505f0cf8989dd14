use crate::commands::open_current_repo;
use crate::core::{
    error::{GitStewardError, Result},
    file_tree::FileNode,
    print_success,
    status_loader::LoadStatusOpts,
};

/// Discard changes to a file or every file under a directory.
///
/// With `unstaged_only`, staged content is kept: files git does not know at
/// all are deleted and the rest is checked out from the index.
pub fn execute_discard(path: &str, unstaged_only: bool) -> Result<()> {
    let git_repo = open_current_repo()?;
    let worktree = git_repo.worktree()?;

    let files = git_repo.load_status_files(LoadStatusOpts::default())?;
    let tree = FileNode::from_changes(files);
    let node = tree
        .find(path)
        .ok_or_else(|| GitStewardError::NoChangesAtPath {
            path: path.to_string(),
        })?;

    match (node.file(), unstaged_only) {
        (Some(file), false) => worktree.discard_all_file_changes(file)?,
        (Some(file), true) if file.short_status().is_untracked() => {
            worktree.remove_untracked_dir_files(node)?
        }
        // a staged new file is restored from the index like any other
        (Some(file), true) => worktree.discard_unstaged_file_changes(file)?,
        (None, false) => worktree.discard_all_dir_changes(node)?,
        (None, true) => worktree.discard_unstaged_dir_changes(node)?,
    }

    let scope = if unstaged_only { "unstaged changes" } else { "all changes" };
    print_success(&format!("Discarded {scope} in {}", node.path()));
    Ok(())
}

/// Stash submodules, hard reset to HEAD and remove untracked files
pub fn execute_reset_and_clean() -> Result<()> {
    let git_repo = open_current_repo()?;
    git_repo.worktree()?.reset_and_clean()?;

    print_success("Working tree reset to HEAD and cleaned");
    Ok(())
}
