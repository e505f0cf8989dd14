use crate::commands::open_current_repo;
use crate::core::{
    config::UserConfig,
    error::{GitStewardError, Result},
};
use std::env;
use std::path::Path;

/// Open `file` in the resolved editor, attached to this terminal
pub fn execute_edit(file: &str, config_path: Option<&Path>) -> Result<()> {
    let config = match config_path {
        Some(path) => UserConfig::load_from(path)?,
        None => UserConfig::load()?,
    };

    let git_repo = open_current_repo()?;
    let worktree = git_repo.worktree()?;
    let cmd_obj = worktree.edit_file_cmd_obj(file, &config, |key| env::var(key).ok())?;
    log::debug!("editing with: {cmd_obj}");

    let status = cmd_obj
        .to_command()
        .current_dir(worktree.workdir())
        .status()
        .map_err(|source| GitStewardError::CommandSpawn {
            command: cmd_obj.to_string(),
            source,
        })?;

    if !status.success() {
        log::warn!("editor exited with {status}");
    }
    Ok(())
}
