//! Well-known locations.
//!
//! ```text
//! ~/.config/claude-project-init/
//!   registry.json
//! ```
//!
//! `CPI_CONFIG_DIR` replaces the whole directory. As with the store, every
//! helper has an `_at(home)` form that tests call with a `TempDir`.

use std::path::{Path, PathBuf};

use crate::error::RegistryError;

/// Environment variable overriding the configuration directory.
pub const CONFIG_DIR_ENV: &str = "CPI_CONFIG_DIR";

pub const APP_DIR: &str = "claude-project-init";
pub const REGISTRY_FILE: &str = "registry.json";

/// `<home>/.config/claude-project-init`
pub fn config_dir_at(home: &Path) -> PathBuf {
    home.join(".config").join(APP_DIR)
}

/// `<home>/.config/claude-project-init/registry.json`
pub fn registry_path_at(home: &Path) -> PathBuf {
    config_dir_at(home).join(REGISTRY_FILE)
}

/// Resolve the configuration directory from the environment:
/// `$CPI_CONFIG_DIR` if set and non-empty, otherwise under the home directory.
pub fn config_dir() -> Result<PathBuf, RegistryError> {
    match std::env::var_os(CONFIG_DIR_ENV) {
        Some(dir) if !dir.is_empty() => Ok(PathBuf::from(dir)),
        _ => Ok(config_dir_at(&home()?)),
    }
}

fn home() -> Result<PathBuf, RegistryError> {
    dirs::home_dir().ok_or(RegistryError::HomeNotFound)
}
