//! Submodule declaration parsing and lifecycle orchestration.
//!
//! [`SubmoduleManager`] wraps the `git submodule` family of commands. Most
//! operations are a single invocation; the interesting ones are multi-step:
//!
//! - [`SubmoduleManager::reset_submodules`] stashes every submodule before the
//!   forced bulk update runs, so a reset never discards submodule work that was
//!   not first saved to a stash.
//! - [`SubmoduleManager::submodule_delete`] falls back to stripping the
//!   submodule's config sections by hand when the path is no longer known to
//!   the index (the submodule was removed upstream but local metadata remains).
//!
//! None of the sequences are transactional: a failure part-way leaves the
//! repository in the intermediate state.

use crate::core::{
    cmd::{CmdObj, CommandRunner, FailureReason},
    error::{GitStewardError, Result},
    os::Os,
};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const GITMODULES_FILE: &str = ".gitmodules";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmoduleConfig {
    pub name: String,
    pub path: Option<String>,
    pub url: Option<String>,
}

impl SubmoduleConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: None,
            url: None,
        }
    }

    fn require_path(&self) -> Result<&str> {
        self.path
            .as_deref()
            .ok_or_else(|| GitStewardError::submodule_path_missing(&self.name))
    }
}

/// Parse `.gitmodules` content.
///
/// ```text
/// [submodule "mysubmodule"]
///     path = blah/mysubmodule
///     url = git@github.com:subbo.git
/// ```
///
/// Key lines before the first header are ignored. Duplicate names are kept.
pub fn parse_submodule_configs(content: &str) -> Vec<SubmoduleConfig> {
    let mut configs: Vec<SubmoduleConfig> = Vec::new();

    for line in content.lines() {
        let line = line.trim();

        // anything after the closing `"]` (a trailing comment) is ignored
        if let Some(name) = line
            .strip_prefix("[submodule \"")
            .and_then(|rest| rest.find("\"]").map(|end| &rest[..end]))
        {
            configs.push(SubmoduleConfig::new(name));
            continue;
        }

        let Some(last) = configs.last_mut() else {
            continue;
        };
        if let Some((key, value)) = line.split_once('=') {
            let value = value.trim().to_string();
            match key.trim() {
                "path" => last.path = Some(value),
                "url" => last.url = Some(value),
                _ => {}
            }
        }
    }

    configs
}

pub struct SubmoduleManager<'a> {
    runner: &'a dyn CommandRunner,
    worktree: Os,
    git_dir: PathBuf,
}

impl<'a> SubmoduleManager<'a> {
    pub fn new(runner: &'a dyn CommandRunner, workdir: impl Into<PathBuf>, git_dir: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            worktree: Os::new(workdir),
            git_dir: git_dir.into(),
        }
    }

    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    /// Submodules declared in `.gitmodules`, in file order. No file means none.
    pub fn get_submodule_configs(&self) -> Result<Vec<SubmoduleConfig>> {
        let path = self.worktree.resolve(GITMODULES_FILE);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(parse_submodule_configs(&content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Stash everything, untracked files included, inside the submodule.
    ///
    /// A submodule without its own `.git` at its path was never initialized and
    /// has nothing to lose, so this is a no-op for it. An empty directory left
    /// by a non-recursive clone counts as uninitialized; running git there
    /// would reach the parent repository instead.
    pub fn submodule_stash(&self, submodule: &SubmoduleConfig) -> Result<()> {
        let Some(path) = submodule.path.as_deref() else {
            log::info!("submodule {} has no path, nothing to stash", submodule.name);
            return Ok(());
        };
        if !self.worktree.file_exists(path)? {
            log::info!("submodule path {path} does not exist, returning");
            return Ok(());
        }
        if !self.worktree.file_exists(Path::new(path).join(".git"))? {
            log::info!("submodule at {path} is not initialized, returning");
            return Ok(());
        }

        self.runner
            .run(&CmdObj::git(["-C", path, "stash", "--include-untracked"]))
    }

    /// Force the submodule back to the commit recorded by the parent
    pub fn submodule_reset(&self, submodule: &SubmoduleConfig) -> Result<()> {
        let path = submodule.require_path()?;
        self.runner
            .run(&CmdObj::git(["submodule", "update", "--init", "--force", "--", path]))
    }

    pub fn submodule_delete(&self, submodule: &SubmoduleConfig) -> Result<()> {
        let path = submodule.require_path()?;
        let section = format!("submodule.{}", submodule.name);

        if let Err(err) = self
            .runner
            .run(&CmdObj::git(["submodule", "deinit", "--force", "--", path]))
        {
            let pathspec_unknown = err
                .command_failure()
                .is_some_and(|f| f.reason() == FailureReason::PathspecNotKnown);
            if !pathspec_unknown {
                return Err(err);
            }

            log::info!("{path} is not in the index, removing config sections for {section}");
            self.runner.run(&CmdObj::git([
                "config",
                "--file",
                GITMODULES_FILE,
                "--remove-section",
                section.as_str(),
            ]))?;
            self.runner
                .run(&CmdObj::git(["config", "--remove-section", section.as_str()]))?;
        }

        if let Err(e) = self
            .runner
            .run(&CmdObj::git(["rm", "--force", "-r", "--", path]))
        {
            // the directory may already be gone
            log::error!("{e}");
        }

        // git keys the private repository by name; older layouts used the path
        let modules = Os::new(self.git_dir.join("modules"));
        modules.remove_dir_all_if_present(&submodule.name)?;
        if submodule.name != path {
            modules.remove_dir_all_if_present(path)?;
        }
        Ok(())
    }

    pub fn submodule_add(&self, name: &str, path: &str, url: &str) -> Result<()> {
        self.runner.run(&CmdObj::git([
            "submodule", "add", "--force", "--name", name, "--", url, path,
        ]))
    }

    /// Rewrite the declared URL, then resync. Not atomic.
    pub fn submodule_update_url(&self, name: &str, path: &str, new_url: &str) -> Result<()> {
        let key = format!("submodule.{name}.url");
        self.runner.run(&CmdObj::git([
            "config",
            "--file",
            GITMODULES_FILE,
            key.as_str(),
            new_url,
        ]))?;

        self.runner
            .run(&CmdObj::git(["submodule", "sync", "--", path]))
    }

    pub fn submodule_init(&self, path: &str) -> Result<()> {
        self.runner
            .run(&CmdObj::git(["submodule", "init", "--", path]))
    }

    pub fn submodule_update(&self, path: &str) -> Result<()> {
        self.runner
            .run(&CmdObj::git(["submodule", "update", "--init", "--", path]))
    }

    pub fn submodule_bulk_init_cmd_obj(&self) -> CmdObj {
        CmdObj::git(["submodule", "init"])
    }

    pub fn submodule_bulk_update_cmd_obj(&self) -> CmdObj {
        CmdObj::git(["submodule", "update"])
    }

    pub fn submodule_force_bulk_update_cmd_obj(&self) -> CmdObj {
        // no --init: uninitialized submodules stay that way
        CmdObj::git(["submodule", "update", "--force"])
    }

    pub fn submodule_bulk_deinit_cmd_obj(&self) -> CmdObj {
        CmdObj::git(["submodule", "deinit", "--all", "--force"])
    }

    /// Stash every submodule, then force-update all of them.
    ///
    /// The bulk update only runs once every stash in this batch succeeded.
    pub fn reset_submodules(&self, submodules: &[SubmoduleConfig]) -> Result<()> {
        for submodule in submodules {
            self.submodule_stash(submodule)?;
        }

        self.runner.run(&self.submodule_force_bulk_update_cmd_obj())
    }
}
