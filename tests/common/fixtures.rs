//! Predefined repository scenarios
//!
//! Each fixture commits a baseline and then leaves a specific mix of staged,
//! unstaged and untracked changes on top of it.

#![allow(dead_code)]

use super::repository::*;
use git_steward::core::error::Result;

/// Committed `tracked.txt` modified in the worktree, plus untracked `new.txt`
pub fn create_modified_and_untracked_repo() -> Result<TestRepo> {
    let repo = setup_test_repo()?;

    create_file(&repo.path, "tracked.txt", "committed\n")?;
    git_add(&repo.path, "tracked.txt")?;
    git_commit(&repo.path, "Initial commit")?;

    create_file(&repo.path, "tracked.txt", "edited\n")?;
    create_file(&repo.path, "new.txt", "brand new\n")?;

    Ok(repo)
}

/// `old.txt` staged as renamed to `new.txt`, with `new.txt` edited again afterwards
pub fn create_staged_rename_repo() -> Result<TestRepo> {
    let repo = setup_test_repo()?;

    create_file(&repo.path, "old.txt", "one\ntwo\nthree\nfour\nfive\n")?;
    git_add(&repo.path, "old.txt")?;
    git_commit(&repo.path, "Initial commit")?;

    git(&repo.path, &["mv", "old.txt", "new.txt"])?;
    create_file(&repo.path, "new.txt", "one\ntwo\nthree\nfour\nfive\nsix\n")?;

    Ok(repo)
}

/// A `src/` directory holding one modified, one staged-new and one untracked file
pub fn create_dir_changes_repo() -> Result<TestRepo> {
    let repo = setup_test_repo()?;

    create_file(&repo.path, "src/main.txt", "main v1\n")?;
    create_file(&repo.path, "README.txt", "readme\n")?;
    git_add(&repo.path, ".")?;
    git_commit(&repo.path, "Initial commit")?;

    create_file(&repo.path, "src/main.txt", "main v2\n")?;
    create_file(&repo.path, "src/staged.txt", "staged\n")?;
    git_add(&repo.path, "src/staged.txt")?;
    create_file(&repo.path, "src/scratch.txt", "untracked\n")?;
    create_file(&repo.path, "README.txt", "readme edited\n")?;

    Ok(repo)
}

/// Parent repository with submodule `lib` at `libs/lib`.
///
/// The returned source repository must outlive the parent's use of it.
pub fn create_repo_with_submodule() -> Result<(TestRepo, TestRepo)> {
    let source = setup_submodule_source()?;
    let repo = setup_test_repo_with_initial_commit()?;
    add_submodule(&repo.path, &source.path, "lib", "libs/lib")?;
    Ok((repo, source))
}
