//! Filesystem primitives rooted at a working tree.
//!
//! Relative paths handed to [`Os`] are resolved against the working tree root it
//! was created with, never against the process's current directory.

use crate::core::error::{GitStewardError, Result};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Os {
    root: PathBuf,
}

impl Os {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Whether the path exists. Errors other than "not found" are returned.
    pub fn file_exists(&self, path: impl AsRef<Path>) -> Result<bool> {
        match fs::symlink_metadata(self.resolve(path)) {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    pub fn remove_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = self.resolve(path);
        log::debug!("removing {}", path.display());
        fs::remove_file(&path).map_err(|e| GitStewardError::remove_failed(path, e))
    }

    /// Remove a directory tree. A directory that is already gone is not an error.
    pub fn remove_dir_all_if_present(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = self.resolve(path);
        match fs::remove_dir_all(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(GitStewardError::remove_failed(path, e)),
        }
    }

    /// Append `line` on its own line, creating the file if needed
    pub fn append_line_to_file(&self, path: impl AsRef<Path>, line: &str) -> Result<()> {
        let path = self.resolve(path);
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&path)?;

        let mut existing = String::new();
        file.read_to_string(&mut existing)?;

        let mut content = String::new();
        if !existing.is_empty() && !existing.ends_with('\n') {
            content.push('\n');
        }
        content.push_str(line);
        content.push('\n');

        file.write_all(content.as_bytes())?;
        Ok(())
    }

    pub fn create_file_with_content(&self, path: impl AsRef<Path>, content: &str) -> Result<()> {
        let path = self.resolve(path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        Ok(())
    }
}
