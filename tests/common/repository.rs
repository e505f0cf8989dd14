//! Git repository management and setup utilities
//!
//! Provides functions for creating throwaway repositories and driving git
//! directly, so tests can arrange a state and then inspect what git reports.

#![allow(dead_code)]

use git_steward::core::{
    cmd::CommandFailure,
    error::{GitStewardError, Result},
    git::GitRepo,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// A repository in a temporary directory.
///
/// `scratch_dir` lives outside the working tree so patch files never show
/// up as untracked content. Both directories are removed on drop.
pub struct TestRepo {
    pub temp_dir: TempDir,
    pub path: PathBuf,
    pub scratch_dir: TempDir,
}

impl TestRepo {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open the repository with scratch files redirected into `scratch_dir`
    pub fn open(&self) -> Result<GitRepo> {
        Ok(GitRepo::open(&self.path)?.with_scratch_dir(self.scratch_dir.path()))
    }
}

/// Run git in `dir` and return its stdout, failing on a non-zero exit
pub fn git(dir: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .map_err(GitStewardError::Io)?;

    if !output.status.success() {
        return Err(CommandFailure::new(
            format!("git {}", args.join(" ")),
            output.status.code(),
            String::from_utf8_lossy(&output.stderr),
        )
        .into());
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

fn configure_identity(dir: &Path) -> Result<()> {
    git(dir, &["config", "user.name", "Test User"])?;
    git(dir, &["config", "user.email", "test@example.com"])?;
    git(dir, &["config", "commit.gpgsign", "false"])?;
    Ok(())
}

/// Sets up a fresh git repository with a local identity
pub fn setup_test_repo() -> Result<TestRepo> {
    let temp_dir = TempDir::new()?;
    let scratch_dir = TempDir::new()?;
    let repo_path = temp_dir.path().to_path_buf();

    git(&repo_path, &["init", "--quiet"])?;
    configure_identity(&repo_path)?;

    Ok(TestRepo {
        temp_dir,
        path: repo_path,
        scratch_dir,
    })
}

/// Sets up a repository whose first commit contains `initial.txt`
pub fn setup_test_repo_with_initial_commit() -> Result<TestRepo> {
    let repo = setup_test_repo()?;

    create_file(&repo.path, "initial.txt", "initial content\n")?;
    git_add(&repo.path, "initial.txt")?;
    git_commit(&repo.path, "Initial commit")?;

    Ok(repo)
}

/// Write `content` to `filename`, creating parent directories as needed
pub fn create_file(repo_path: &Path, filename: &str, content: &str) -> Result<()> {
    let path = repo_path.join(filename);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

pub fn read_file(repo_path: &Path, filename: &str) -> Result<String> {
    Ok(fs::read_to_string(repo_path.join(filename))?)
}

pub fn git_add(repo_path: &Path, filename: &str) -> Result<()> {
    git(repo_path, &["add", "--", filename])?;
    Ok(())
}

pub fn git_commit(repo_path: &Path, message: &str) -> Result<()> {
    git(repo_path, &["commit", "--quiet", "-m", message])?;
    Ok(())
}

/// `git status --porcelain` lines, untracked files listed individually
pub fn porcelain_status(repo_path: &Path) -> Result<Vec<String>> {
    let output = git(repo_path, &["status", "--porcelain", "--untracked-files=all"])?;
    Ok(output.lines().map(str::to_string).collect())
}

/// Whether git reports no changes at all
pub fn is_clean(repo_path: &Path) -> Result<bool> {
    Ok(porcelain_status(repo_path)?.is_empty())
}

/// Create a standalone repository with one commit, for use as a submodule source
pub fn setup_submodule_source() -> Result<TestRepo> {
    let repo = setup_test_repo()?;
    create_file(&repo.path, "lib.txt", "library v1\n")?;
    git_add(&repo.path, "lib.txt")?;
    git_commit(&repo.path, "Library commit")?;
    Ok(repo)
}

/// Add `source` as a submodule named `name` at `sub_path` and commit it
pub fn add_submodule(repo_path: &Path, source: &Path, name: &str, sub_path: &str) -> Result<()> {
    let url = source.to_string_lossy().into_owned();
    git(
        repo_path,
        &[
            "-c",
            "protocol.file.allow=always",
            "submodule",
            "add",
            "--quiet",
            "--name",
            name,
            "--",
            url.as_str(),
            sub_path,
        ],
    )?;
    configure_identity(&repo_path.join(sub_path))?;
    git_commit(repo_path, &format!("Add submodule {name}"))
}

/// Clone `source` without `--recurse-submodules`, leaving submodule paths empty
pub fn clone_without_submodules(source: &Path) -> Result<TestRepo> {
    let temp_dir = TempDir::new()?;
    let scratch_dir = TempDir::new()?;
    let repo_path = temp_dir.path().to_path_buf();
    let url = source.to_string_lossy().into_owned();
    let target = repo_path.to_string_lossy().into_owned();

    git(source, &["clone", "--quiet", url.as_str(), target.as_str()])?;
    configure_identity(&repo_path)?;

    Ok(TestRepo {
        temp_dir,
        path: repo_path,
        scratch_dir,
    })
}
