//! User configuration.
//!
//! Stored as JSON at `<config dir>/git-steward/config.json`. A missing file means
//! defaults; a file that exists but does not parse is an error so a typo never
//! silently disables a setting.

use crate::core::dirs::get_config_directory;
use crate::core::error::{GitStewardError, Result};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct OsConfig {
    /// Command used to open files for editing, e.g. `code --wait`
    pub edit_command: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct UserConfig {
    pub os: OsConfig,
}

impl UserConfig {
    pub fn default_path() -> Result<PathBuf> {
        Ok(get_config_directory()?.join("config.json"))
    }

    /// Load from the default location, falling back to defaults
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("no config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&content).map_err(|source| GitStewardError::ConfigParseFailed {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config = UserConfig::load_from(&temp_dir.path().join("config.json"))?;
        assert_eq!(config, UserConfig::default());
        assert!(config.os.edit_command.is_none());
        Ok(())
    }

    #[test]
    fn test_save_and_load() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("nested/config.json");
        let config = UserConfig {
            os: OsConfig {
                edit_command: Some("code --wait".to_string()),
            },
        };

        config.save_to(&path)?;
        assert_eq!(UserConfig::load_from(&path)?, config);
        Ok(())
    }

    #[test]
    fn test_partial_file_uses_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, "{}")?;
        assert_eq!(UserConfig::load_from(&path)?, UserConfig::default());
        Ok(())
    }

    #[test]
    fn test_invalid_file_is_an_error() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, "{ not json")?;

        let err = UserConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
        Ok(())
    }
}
