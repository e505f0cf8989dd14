//! Test doubles for the execution and status-loading seams.

use crate::core::{
    cmd::{CmdObj, CommandFailure, CommandRunner},
    error::Result,
    file_change::FileChange,
    status_loader::{LoadStatusOpts, StatusLoader},
};
use std::cell::RefCell;

/// Records every command it is asked to run.
///
/// Commands succeed with empty output unless a canned response or failure
/// was registered for a substring of their rendered command line.
#[derive(Default)]
pub struct RecordingRunner {
    commands: RefCell<Vec<CmdObj>>,
    responses: RefCell<Vec<(String, String)>>,
    failures: RefCell<Vec<(String, String)>>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, pattern: &str, output: &str) {
        self.responses
            .borrow_mut()
            .push((pattern.to_string(), output.to_string()));
    }

    pub fn fail_on(&self, pattern: &str, stderr: &str) {
        self.failures
            .borrow_mut()
            .push((pattern.to_string(), stderr.to_string()));
    }

    pub fn commands(&self) -> Vec<String> {
        self.commands.borrow().iter().map(ToString::to_string).collect()
    }

    pub fn cmd_objs(&self) -> Vec<CmdObj> {
        self.commands.borrow().clone()
    }
}

impl CommandRunner for RecordingRunner {
    fn run_with_output(&self, cmd: &CmdObj) -> Result<String> {
        self.commands.borrow_mut().push(cmd.clone());
        let rendered = cmd.to_string();

        if let Some((_, stderr)) = self
            .failures
            .borrow()
            .iter()
            .find(|(pattern, _)| rendered.contains(pattern.as_str()))
        {
            return Err(CommandFailure::new(rendered, Some(1), stderr.clone()).into());
        }

        let output = self
            .responses
            .borrow()
            .iter()
            .find(|(pattern, _)| rendered.contains(pattern.as_str()))
            .map(|(_, output)| output.clone())
            .unwrap_or_default();
        Ok(output)
    }
}

/// Serves fixed status lists and records the options it was called with.
#[derive(Default)]
pub struct FakeStatusLoader {
    pub with_renames: Vec<FileChange>,
    pub without_renames: Vec<FileChange>,
    calls: RefCell<Vec<LoadStatusOpts>>,
}

impl FakeStatusLoader {
    pub fn new(without_renames: Vec<FileChange>) -> Self {
        Self {
            without_renames,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<LoadStatusOpts> {
        self.calls.borrow().clone()
    }
}

impl StatusLoader for FakeStatusLoader {
    fn load_status_files(&self, opts: LoadStatusOpts) -> Result<Vec<FileChange>> {
        self.calls.borrow_mut().push(opts);
        if opts.no_renames {
            Ok(self.without_renames.clone())
        } else {
            Ok(self.with_renames.clone())
        }
    }
}

pub fn file(name: &str, status: &str) -> FileChange {
    FileChange::new(name, None, status.parse().expect("valid status"))
}

pub fn renamed(previous: &str, name: &str, status: &str) -> FileChange {
    FileChange::new(name, Some(previous.to_string()), status.parse().expect("valid status"))
}
