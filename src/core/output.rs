//! Unified output formatting for the CLI.
//!
//! Errors are red, successes green, secondary details bright black. Every
//! message is followed by a blank line so consecutive commands stay readable.

use crate::core::{repo_state::RepositoryState, submodules::SubmoduleConfig};
use colored::*;

/// `✕ Error: <message>` in red, on stderr
pub fn print_error(message: &str) {
    eprintln!("\n{} {}\n", "✕ Error:".red(), message.white());
}

/// `✓ <message>` with a green checkmark
pub fn print_success(message: &str) {
    println!("\n{} {}\n", "✓".green(), message.white());
}

pub fn print_info(message: &str) {
    println!("\n{}\n", message.white());
}

pub fn print_section_header(header: &str) {
    println!("\n{}:\n", header.white());
}

/// Repository state, colored by how much attention it needs
pub fn format_state(state: RepositoryState) -> ColoredString {
    match state {
        RepositoryState::Normal => state.description().green(),
        RepositoryState::Merging => state.description().yellow(),
        RepositoryState::RebasingNonInteractive | RepositoryState::RebasingInteractive => {
            state.description().magenta()
        }
    }
}

/// One line per submodule: `name  path  (url)`
pub fn format_submodule(submodule: &SubmoduleConfig) -> String {
    let path = submodule.path.as_deref().unwrap_or("<no path>");
    let url = submodule.url.as_deref().unwrap_or("<no url>");
    format!(
        "  {}  {}  {}",
        submodule.name.white(),
        path.blue(),
        format!("({url})").bright_black()
    )
}
