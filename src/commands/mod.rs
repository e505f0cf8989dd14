pub mod discard;
pub mod edit;
pub mod patch;
pub mod stage;
pub mod state;
pub mod submodule;

pub use discard::*;
pub use edit::*;
pub use patch::*;
pub use stage::*;
pub use state::*;
pub use submodule::*;

use crate::core::{
    error::{GitStewardError, Result},
    git::GitRepo,
};
use std::env;

/// Open the repository containing the current directory
pub fn open_current_repo() -> Result<GitRepo> {
    let current_dir = env::current_dir()?;
    GitRepo::open(&current_dir).map_err(|e| {
        log::debug!("repository discovery failed: {e}");
        GitStewardError::NotInGitRepo
    })
}
