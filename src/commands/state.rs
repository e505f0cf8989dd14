use crate::commands::open_current_repo;
use crate::core::{error::Result, output::format_state, repo_state::RepositoryState};
use colored::*;

pub fn execute_state() -> Result<()> {
    let git_repo = open_current_repo()?;

    let state = git_repo.repository_state();
    println!("\n{} {}", "State:".white(), format_state(state));

    if git_repo.is_bare_repo() {
        println!("{}", "Bare repository: file operations are unavailable".bright_black());
    } else if state != RepositoryState::Normal {
        println!(
            "{}",
            "Resolve or abort the operation in progress before resetting".bright_black()
        );
    }
    println!();

    Ok(())
}
