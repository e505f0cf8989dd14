use crate::core::error::GitStewardError;
use std::path::PathBuf;

const APP_DIR: &str = "git-steward";

/// Per-platform base directory: an XDG variable on unix-likes, a fixed
/// location under the home directory on macOS, `dirs` elsewhere
fn platform_base(
    xdg_var: &str,
    xdg_fallback: &str,
    macos_dir: &str,
    other: fn() -> Option<PathBuf>,
) -> Option<PathBuf> {
    match std::env::consts::OS {
        "linux" | "freebsd" | "netbsd" | "openbsd" => std::env::var_os(xdg_var)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|home| home.join(xdg_fallback))),
        "macos" => dirs::home_dir().map(|home| home.join(macos_dir)),
        _ => other(),
    }
}

/// `<config dir>/git-steward`, home of `config.json`
pub fn get_config_directory() -> Result<PathBuf, GitStewardError> {
    platform_base(
        "XDG_CONFIG_HOME",
        ".config",
        "Library/Application Support",
        dirs::config_dir,
    )
    .map(|base| base.join(APP_DIR))
    .ok_or(GitStewardError::ConfigDirectoryNotFound)
}

/// `<cache dir>/git-steward`, where scratch patch files are written
pub fn get_cache_directory() -> Result<PathBuf, GitStewardError> {
    platform_base("XDG_CACHE_HOME", ".cache", "Library/Caches", dirs::cache_dir)
        .map(|base| base.join(APP_DIR))
        .ok_or(GitStewardError::ConfigDirectoryNotFound)
}
