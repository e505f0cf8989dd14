use crate::commands::open_current_repo;
use crate::core::{
    cmd::CommandRunner,
    error::{GitStewardError, Result},
    git::GitRepo,
    output::format_submodule,
    print_info, print_section_header, print_success,
    submodules::SubmoduleConfig,
};
use clap::ValueEnum;

/// Whole-repository submodule operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BulkAction {
    /// git submodule init
    Init,
    /// git submodule update
    Update,
    /// git submodule update --force
    ForceUpdate,
    /// git submodule deinit --all --force
    Deinit,
}

fn find_submodule(git_repo: &GitRepo, name: &str) -> Result<SubmoduleConfig> {
    git_repo
        .submodules()?
        .get_submodule_configs()?
        .into_iter()
        .find(|s| s.name == name)
        .ok_or_else(|| GitStewardError::SubmoduleNotFound {
            name: name.to_string(),
        })
}

pub fn execute_submodule_list() -> Result<()> {
    let git_repo = open_current_repo()?;
    let configs = git_repo.submodules()?.get_submodule_configs()?;

    if configs.is_empty() {
        print_info("No submodules declared in .gitmodules");
        return Ok(());
    }

    print_section_header("Submodules");
    for config in &configs {
        println!("{}", format_submodule(config));
    }
    println!();
    Ok(())
}

pub fn execute_submodule_stash(name: &str) -> Result<()> {
    let git_repo = open_current_repo()?;
    let submodule = find_submodule(&git_repo, name)?;
    git_repo.submodules()?.submodule_stash(&submodule)?;

    print_success(&format!("Stashed changes in submodule {name}"));
    Ok(())
}

/// Stash the submodule's work, then force it back to the recorded commit
pub fn execute_submodule_reset(name: &str) -> Result<()> {
    let git_repo = open_current_repo()?;
    let submodule = find_submodule(&git_repo, name)?;
    let manager = git_repo.submodules()?;

    manager.submodule_stash(&submodule)?;
    manager.submodule_reset(&submodule)?;

    print_success(&format!("Reset submodule {name}"));
    Ok(())
}

pub fn execute_submodule_delete(name: &str) -> Result<()> {
    let git_repo = open_current_repo()?;
    let submodule = find_submodule(&git_repo, name)?;
    git_repo.submodules()?.submodule_delete(&submodule)?;

    print_success(&format!("Deleted submodule {name}"));
    Ok(())
}

pub fn execute_submodule_add(name: &str, path: &str, url: &str) -> Result<()> {
    let git_repo = open_current_repo()?;
    git_repo.submodules()?.submodule_add(name, path, url)?;

    print_success(&format!("Added submodule {name} at {path}"));
    Ok(())
}

pub fn execute_submodule_update_url(name: &str, new_url: &str) -> Result<()> {
    let git_repo = open_current_repo()?;
    let submodule = find_submodule(&git_repo, name)?;
    let path = submodule
        .path
        .as_deref()
        .ok_or_else(|| GitStewardError::submodule_path_missing(name))?;
    git_repo
        .submodules()?
        .submodule_update_url(name, path, new_url)?;

    print_success(&format!("Submodule {name} now points at {new_url}"));
    Ok(())
}

pub fn execute_submodule_init(path: &str) -> Result<()> {
    let git_repo = open_current_repo()?;
    git_repo.submodules()?.submodule_init(path)?;

    print_success(&format!("Initialized submodule at {path}"));
    Ok(())
}

pub fn execute_submodule_update(path: &str) -> Result<()> {
    let git_repo = open_current_repo()?;
    git_repo.submodules()?.submodule_update(path)?;

    print_success(&format!("Updated submodule at {path}"));
    Ok(())
}

/// Stash every declared submodule, then force-update them all
pub fn execute_submodule_reset_all() -> Result<()> {
    let git_repo = open_current_repo()?;
    let manager = git_repo.submodules()?;
    let configs = manager.get_submodule_configs()?;

    if configs.is_empty() {
        print_info("No submodules declared in .gitmodules");
        return Ok(());
    }

    manager.reset_submodules(&configs)?;
    print_success(&format!("Reset {} submodule(s)", configs.len()));
    Ok(())
}

pub fn execute_submodule_bulk(action: BulkAction) -> Result<()> {
    let git_repo = open_current_repo()?;
    let manager = git_repo.submodules()?;

    let cmd_obj = match action {
        BulkAction::Init => manager.submodule_bulk_init_cmd_obj(),
        BulkAction::Update => manager.submodule_bulk_update_cmd_obj(),
        BulkAction::ForceUpdate => manager.submodule_force_bulk_update_cmd_obj(),
        BulkAction::Deinit => manager.submodule_bulk_deinit_cmd_obj(),
    };
    git_repo.runner().run(&cmd_obj)?;

    print_success(&format!("Ran {cmd_obj}"));
    Ok(())
}
