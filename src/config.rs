use crate::error::{Result, SemverError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the configuration file looked up in the working directory and
/// the user config directory
pub const CONFIG_FILE_NAME: &str = "merge-semver.toml";

/// Persistent defaults for tag computation.
///
/// Every field is optional; unset fields fall through to environment inputs
/// or built-in defaults. An explicit empty `prefix` means "no prefix".
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// `auto`, `major`, `minor` or `patch`
    pub bump: Option<String>,
    pub prefix: Option<String>,
    pub prerelease_id: Option<String>,
    pub force_prerelease: Option<bool>,
    /// Mainline branch that versioning merges target
    pub branch_name: Option<String>,
    /// Version to start from instead of the latest tag
    pub base_version: Option<String>,
}

/// Parses configuration from TOML text.
pub fn parse_config(contents: &str) -> Result<Config> {
    toml::from_str(contents).map_err(|e| SemverError::config(e.to_string()))
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `merge-semver.toml` in current directory
/// 3. `merge-semver.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed, or if the custom
///   path does not exist
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let path = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => default_config_path(),
    };

    let Some(path) = path else {
        debug!("no configuration file found, using defaults");
        return Ok(Config::default());
    };

    let contents = fs::read_to_string(&path).map_err(|e| {
        SemverError::config(format!("cannot read {}: {}", path.display(), e))
    })?;

    let config = parse_config(&contents).map_err(|e| match e {
        SemverError::Config(msg) => SemverError::config(format!("{}: {}", path.display(), msg)),
        other => other,
    })?;
    debug!(path = %path.display(), "loaded configuration file");
    Ok(config)
}

fn default_config_path() -> Option<PathBuf> {
    let local = Path::new(".").join(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .filter(|path| path.exists())
}
