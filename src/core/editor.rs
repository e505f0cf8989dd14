//! Resolving the command used to edit a file.
//!
//! Probed in order: the user's config, git's `core.editor`, `$GIT_EDITOR`,
//! `$VISUAL`, `$EDITOR`, and finally `vi` if it is on the path. There is no
//! default beyond that.

use crate::core::{
    cmd::{shell_quote, CmdObj, CommandRunner},
    config::UserConfig,
    error::{GitStewardError, Result},
};

const EDITOR_ENV_VARS: [&str; 3] = ["GIT_EDITOR", "VISUAL", "EDITOR"];
const LAST_RESORT_EDITOR: &str = "vi";

/// Read a key from git's configuration; unset keys and failures read as `None`
pub fn get_config_value(runner: &dyn CommandRunner, key: &str) -> Option<String> {
    match runner.run_with_output(&CmdObj::git(["config", "--get", key])) {
        Ok(value) => Some(value.trim().to_string()).filter(|v| !v.is_empty()),
        Err(e) => {
            log::debug!("git config {key} unavailable: {e}");
            None
        }
    }
}

pub fn resolve_editor<E>(runner: &dyn CommandRunner, config: &UserConfig, getenv: E) -> Result<String>
where
    E: Fn(&str) -> Option<String>,
{
    let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

    if let Some(editor) = non_empty(config.os.edit_command.clone()) {
        return Ok(editor);
    }
    if let Some(editor) = get_config_value(runner, "core.editor") {
        return Ok(editor);
    }
    for var in EDITOR_ENV_VARS {
        if let Some(editor) = non_empty(getenv(var)) {
            return Ok(editor);
        }
    }
    if runner
        .run(&CmdObj::new("which", [LAST_RESORT_EDITOR]))
        .is_ok()
    {
        return Ok(LAST_RESORT_EDITOR.to_string());
    }

    Err(GitStewardError::NoEditorConfigured)
}

/// Build the shell command that opens `filename` in the resolved editor
pub fn edit_file_cmd_obj<E>(
    runner: &dyn CommandRunner,
    config: &UserConfig,
    getenv: E,
    filename: &str,
) -> Result<CmdObj>
where
    E: Fn(&str) -> Option<String>,
{
    let editor = resolve_editor(runner, config, getenv)?;
    Ok(CmdObj::shell(format!("{editor} {}", shell_quote(filename))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::OsConfig;
    use crate::core::testing::RecordingRunner;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn config_with(edit_command: &str) -> UserConfig {
        UserConfig {
            os: OsConfig {
                edit_command: Some(edit_command.to_string()),
            },
        }
    }

    #[test]
    fn test_user_config_wins() {
        let runner = RecordingRunner::new();
        runner.respond("core.editor", "nano\n");
        let editor = resolve_editor(&runner, &config_with("code --wait"), env(&[("EDITOR", "vim")]));
        assert_eq!(editor.unwrap(), "code --wait");
        assert!(runner.commands().is_empty());
    }

    #[test]
    fn test_git_config_before_env() {
        let runner = RecordingRunner::new();
        runner.respond("core.editor", "nano\n");
        let editor = resolve_editor(&runner, &UserConfig::default(), env(&[("EDITOR", "vim")]));
        assert_eq!(editor.unwrap(), "nano");
    }

    #[test]
    fn test_env_var_order() {
        let runner = RecordingRunner::new();
        runner.fail_on("core.editor", "");

        let editor = resolve_editor(
            &runner,
            &UserConfig::default(),
            env(&[("EDITOR", "vim"), ("VISUAL", "emacs"), ("GIT_EDITOR", "hx")]),
        );
        assert_eq!(editor.unwrap(), "hx");

        let editor = resolve_editor(
            &runner,
            &UserConfig::default(),
            env(&[("EDITOR", "vim"), ("VISUAL", "emacs")]),
        );
        assert_eq!(editor.unwrap(), "emacs");

        let editor = resolve_editor(&runner, &UserConfig::default(), env(&[("EDITOR", "vim")]));
        assert_eq!(editor.unwrap(), "vim");
    }

    #[test]
    fn test_falls_back_to_vi_on_path() {
        let runner = RecordingRunner::new();
        let editor = resolve_editor(&runner, &UserConfig::default(), env(&[]));
        assert_eq!(editor.unwrap(), "vi");
        assert_eq!(
            runner.commands(),
            vec!["git config --get core.editor", "which vi"]
        );
    }

    #[test]
    fn test_no_editor_is_an_error() {
        let runner = RecordingRunner::new();
        runner.fail_on("which vi", "");
        let err = resolve_editor(&runner, &UserConfig::default(), env(&[])).unwrap_err();
        assert!(matches!(err, GitStewardError::NoEditorConfigured));
    }

    #[test]
    fn test_edit_file_cmd_obj_quotes_filename() {
        let runner = RecordingRunner::new();
        let cmd = edit_file_cmd_obj(
            &runner,
            &config_with("code --wait"),
            env(&[]),
            "my file.txt",
        )
        .unwrap();
        assert_eq!(cmd.program, "sh");
        assert_eq!(cmd.args, vec!["-c", "code --wait 'my file.txt'"]);
    }
}
