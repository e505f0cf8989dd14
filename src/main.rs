use clap::{Parser, Subcommand};
use git_steward::commands::*;
use git_steward::core::{error::Result, print_error};
use std::env;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "git-steward")]
#[command(about = "Safe staging, discarding and submodule orchestration for git")]
#[command(version = "0.1.0")]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Read user configuration from this file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show whether the repository is mid-rebase, mid-merge or normal
    State,
    /// Discard changes to a file or directory
    Discard {
        /// Path of a changed file or a directory containing changes
        path: String,
        /// Keep staged content, only drop working tree changes
        #[arg(long)]
        unstaged: bool,
    },
    /// Stage files
    Stage {
        /// Stage every change in the working tree
        #[arg(short, long)]
        all: bool,
        paths: Vec<String>,
    },
    /// Unstage files
    Unstage {
        /// Unstage everything
        #[arg(short, long)]
        all: bool,
        paths: Vec<String>,
    },
    /// Append a pattern to .gitignore
    Ignore { pattern: String },
    /// Apply a patch file to the working tree
    ApplyPatch {
        file: PathBuf,
        /// Extra `git apply` flag without the leading dashes (e.g. cached, reverse)
        #[arg(long = "flag", value_name = "FLAG")]
        flags: Vec<String>,
    },
    /// Open a file in the configured editor
    Edit { file: String },
    /// Stash submodules, hard reset to HEAD and remove untracked files
    ResetAndClean,
    /// Manage submodules
    Submodule {
        #[command(subcommand)]
        command: SubmoduleCommands,
    },
}

#[derive(Subcommand)]
enum SubmoduleCommands {
    /// List submodules declared in .gitmodules
    List,
    /// Stash changes inside a submodule, untracked files included
    Stash { name: String },
    /// Stash, then force a submodule back to its recorded commit
    Reset { name: String },
    /// Deinitialize and remove a submodule
    Delete { name: String },
    /// Add a new submodule
    Add {
        name: String,
        path: String,
        url: String,
    },
    /// Point a submodule at a new URL
    UpdateUrl { name: String, url: String },
    /// Initialize the submodule at a path
    Init { path: String },
    /// Check out the recorded commit of the submodule at a path
    Update { path: String },
    /// Stash and force-update every submodule
    ResetAll,
    /// Run a whole-repository submodule command
    Bulk {
        #[arg(value_enum)]
        action: BulkAction,
    },
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::State => execute_state(),
        Commands::Discard { path, unstaged } => execute_discard(&path, unstaged),
        Commands::Stage { all, paths } => execute_stage(all, paths),
        Commands::Unstage { all, paths } => execute_unstage(all, paths),
        Commands::Ignore { pattern } => execute_ignore(&pattern),
        Commands::ApplyPatch { file, flags } => execute_apply_patch(&file, flags),
        Commands::Edit { file } => execute_edit(&file, cli.config.as_deref()),
        Commands::ResetAndClean => execute_reset_and_clean(),
        Commands::Submodule { command } => match command {
            SubmoduleCommands::List => execute_submodule_list(),
            SubmoduleCommands::Stash { name } => execute_submodule_stash(&name),
            SubmoduleCommands::Reset { name } => execute_submodule_reset(&name),
            SubmoduleCommands::Delete { name } => execute_submodule_delete(&name),
            SubmoduleCommands::Add { name, path, url } => execute_submodule_add(&name, &path, &url),
            SubmoduleCommands::UpdateUrl { name, url } => execute_submodule_update_url(&name, &url),
            SubmoduleCommands::Init { path } => execute_submodule_init(&path),
            SubmoduleCommands::Update { path } => execute_submodule_update(&path),
            SubmoduleCommands::ResetAll => execute_submodule_reset_all(),
            SubmoduleCommands::Bulk { action } => execute_submodule_bulk(action),
        },
    }
}

fn main() {
    let cli = Cli::parse();

    // Configure logging based on --debug flag
    if cli.debug {
        env::set_var("RUST_LOG", "debug");
    } else if env::var_os("RUST_LOG").is_none() {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    if let Err(e) = run(cli) {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}
