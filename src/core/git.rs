//! Repository handle.
//!
//! [`GitRepo`] opens a repository with `git2`, records where its git directory and
//! working tree live, and hands out the managers that operate on it. Paths are
//! fixed once at open time and passed explicitly to every component.
//!
//! # Public API
//! - [`GitRepo::open`]: discover the repository containing a path
//! - [`GitRepo::status_classifier`]: rebase/merge state detection
//! - [`GitRepo::worktree`]: discard, stage and reset operations
//! - [`GitRepo::submodules`]: submodule lifecycle operations

use crate::core::{
    cmd::GitCommandRunner,
    dirs::get_cache_directory,
    error::{GitStewardError, Result},
    file_change::FileChange,
    repo_state::{RepositoryState, StatusClassifier},
    status_loader::{LoadStatusOpts, PorcelainStatusLoader, StatusLoader},
    submodules::SubmoduleManager,
    worktree::WorktreeManager,
};
use git2::Repository;
use std::path::{Path, PathBuf};

pub struct GitRepo {
    repo: Repository,
    git_dir: PathBuf,
    workdir: Option<PathBuf>,
    runner: GitCommandRunner,
    loader: PorcelainStatusLoader<GitCommandRunner>,
    scratch_dir: Option<PathBuf>,
}

impl GitRepo {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::discover(path)?;
        let git_dir = repo.path().to_path_buf();
        let workdir = repo.workdir().map(Path::to_path_buf);
        let runner = GitCommandRunner::new(workdir.clone().unwrap_or_else(|| git_dir.clone()));
        let loader = PorcelainStatusLoader::new(runner.clone());

        log::debug!(
            "opened repository at {} (workdir: {:?})",
            git_dir.display(),
            workdir
        );

        Ok(GitRepo {
            repo,
            git_dir,
            workdir,
            runner,
            loader,
            scratch_dir: None,
        })
    }

    /// Use `dir` for scratch files instead of the per-repository cache directory
    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = Some(dir.into());
        self
    }

    pub fn get_repository(&self) -> &Repository {
        &self.repo
    }

    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    pub fn workdir(&self) -> Result<&Path> {
        self.workdir.as_deref().ok_or(GitStewardError::NoWorkingTree)
    }

    pub fn runner(&self) -> &GitCommandRunner {
        &self.runner
    }

    pub fn is_bare_repo(&self) -> bool {
        self.repo.is_bare()
    }

    pub fn status_classifier(&self) -> StatusClassifier {
        StatusClassifier::new(&self.git_dir)
    }

    pub fn repository_state(&self) -> RepositoryState {
        self.status_classifier().repository_state()
    }

    pub fn load_status_files(&self, opts: LoadStatusOpts) -> Result<Vec<FileChange>> {
        self.workdir()?;
        self.loader.load_status_files(opts)
    }

    /// `<cache dir>/git-steward/<repo name>` unless overridden
    pub fn scratch_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.scratch_dir {
            return Ok(dir.clone());
        }
        let repo_name = self
            .workdir
            .as_deref()
            .unwrap_or(self.git_dir.as_path())
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "repo".to_string());
        Ok(get_cache_directory()?.join(repo_name))
    }

    pub fn worktree(&self) -> Result<WorktreeManager<'_>> {
        let workdir = self.workdir()?;
        Ok(WorktreeManager::new(
            &self.runner,
            &self.loader,
            workdir,
            &self.git_dir,
            self.scratch_dir()?,
        ))
    }

    pub fn submodules(&self) -> Result<SubmoduleManager<'_>> {
        let workdir = self.workdir()?;
        Ok(SubmoduleManager::new(&self.runner, workdir, &self.git_dir))
    }
}
