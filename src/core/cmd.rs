//! Operation descriptions and their execution.
//!
//! Every component in this crate describes the work it wants done as a [`CmdObj`]
//! and hands it to a [`CommandRunner`]. The real runner, [`GitCommandRunner`],
//! spawns processes in the repository's working tree; tests substitute a recording
//! runner so the decision logic can be checked without a real `git`.
//!
//! # Public API
//! - [`CmdObj`]: program, argv and environment overrides for one invocation
//! - [`CommandRunner`]: execution capability consumed by the managers
//! - [`GitCommandRunner`]: process-backed runner rooted at a working tree
//! - [`CommandFailure`] / [`FailureReason`]: structured non-zero exit information

use crate::core::error::{GitStewardError, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Text git prints when a pathspec names nothing in the index.
const PATHSPEC_NOT_KNOWN: &str = "did not match any file(s) known to git";

/// A fully-formed description of one process invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdObj {
    pub program: String,
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
}

impl CmdObj {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            env: Vec::new(),
        }
    }

    /// Build a `git` invocation from its arguments
    pub fn git<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new("git", args)
    }

    /// Build an invocation interpreted by the user's shell.
    ///
    /// Only used where the command text itself comes from configuration
    /// (e.g. an editor command such as `code --wait`).
    pub fn shell(line: impl Into<String>) -> Self {
        Self::new("sh", ["-c".to_string(), line.into()])
    }

    /// Add `KEY=value` environment overrides. Malformed entries are ignored.
    pub fn add_env_vars<I, S>(&mut self, vars: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for var in vars {
            if let Some((key, value)) = var.as_ref().split_once('=') {
                self.env.push((key.to_string(), value.to_string()));
            }
        }
        self
    }

    /// Convert into a `std::process::Command` ready to spawn
    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd.envs(self.env.iter().map(|(k, v)| (k, v)));
        cmd
    }
}

impl fmt::Display for CmdObj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) || arg.contains('"') {
                write!(f, " \"{}\"", arg.replace('"', "\\\""))?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Quote a string for inclusion in a POSIX shell command line
pub fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "'\\''"))
}

/// Why an invocation failed, as far as callers need to branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// The pathspec named nothing tracked by the index.
    PathspecNotKnown,
    Other,
}

/// A non-zero exit from an external tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandFailure {
    pub command: String,
    pub code: Option<i32>,
    pub stderr: String,
}

impl CommandFailure {
    pub fn new(command: impl Into<String>, code: Option<i32>, stderr: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            code,
            stderr: stderr.into(),
        }
    }

    /// Classify the failure.
    ///
    /// git has no machine-readable reason for pathspec errors, so this falls
    /// back to matching the (English) message text.
    pub fn reason(&self) -> FailureReason {
        if self.stderr.contains(PATHSPEC_NOT_KNOWN) {
            FailureReason::PathspecNotKnown
        } else {
            FailureReason::Other
        }
    }
}

impl fmt::Display for CommandFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "'{}' failed with exit code {code}", self.command)?,
            None => write!(f, "'{}' was terminated by a signal", self.command)?,
        }
        if !self.stderr.is_empty() {
            write!(f, ": {}", self.stderr)?;
        }
        Ok(())
    }
}

/// Execution capability for operation descriptions.
pub trait CommandRunner {
    /// Run the command, discarding its output
    fn run(&self, cmd: &CmdObj) -> Result<()> {
        self.run_with_output(cmd).map(|_| ())
    }

    /// Run the command and return its standard output
    fn run_with_output(&self, cmd: &CmdObj) -> Result<String>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, cmd: &CmdObj) -> Result<()> {
        (**self).run(cmd)
    }

    fn run_with_output(&self, cmd: &CmdObj) -> Result<String> {
        (**self).run_with_output(cmd)
    }
}

/// Runs commands as child processes inside a working tree.
#[derive(Debug, Clone)]
pub struct GitCommandRunner {
    workdir: PathBuf,
}

impl GitCommandRunner {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }
}

impl CommandRunner for GitCommandRunner {
    fn run_with_output(&self, cmd: &CmdObj) -> Result<String> {
        log::debug!("running: {cmd}");

        let mut command = cmd.to_command();
        command.current_dir(&self.workdir);

        let output = command.output().map_err(|source| GitStewardError::CommandSpawn {
            command: cmd.to_string(),
            source,
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CommandFailure::new(cmd.to_string(), output.status.code(), stderr.trim()).into());
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
