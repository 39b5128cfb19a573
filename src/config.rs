use crate::error::{BumpError, Result};
use crate::git::Backend;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the current directory
pub const LOCAL_CONFIG_FILE: &str = "tagbump.toml";

/// File name looked up in the user config directory
pub const USER_CONFIG_FILE: &str = ".tagbump.toml";

/// Represents the complete configuration for tag-bump.
///
/// Every key is optional; command-line flags override whatever is loaded here.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Namespace token in `<namespace>/<package>@<version>` tags
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Directory whose immediate subdirectories are the packages
    #[serde(default = "default_packages_root")]
    pub packages_root: PathBuf,

    /// Remote that tags are fetched from and pushed to
    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default)]
    pub backend: Backend,

    #[serde(default)]
    pub behavior: BehaviorConfig,
}

fn default_namespace() -> String {
    "ns".to_string()
}

fn default_packages_root() -> PathBuf {
    PathBuf::from("packages")
}

fn default_remote() -> String {
    "origin".to_string()
}

/// Configuration for behavior customization.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct BehaviorConfig {
    /// Exit non-zero when any package fails
    #[serde(default)]
    pub strict: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            namespace: default_namespace(),
            packages_root: default_packages_root(),
            remote: default_remote(),
            backend: Backend::default(),
            behavior: BehaviorConfig::default(),
        }
    }
}

/// Parse configuration from TOML text
pub fn parse_config(text: &str) -> Result<Config> {
    toml::from_str(text).map_err(|e| BumpError::config(format!("Invalid configuration: {}", e)))
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter (must exist)
/// 2. `tagbump.toml` in current directory
/// 3. `.tagbump.toml` in user config directory
/// 4. Default configuration if no file found
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_path {
        return read_config(path);
    }

    let local = Path::new(LOCAL_CONFIG_FILE);
    if local.exists() {
        return read_config(local);
    }

    if let Some(config_dir) = dirs::config_dir() {
        let user_config = config_dir.join(USER_CONFIG_FILE);
        if user_config.exists() {
            return read_config(&user_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let text = fs::read_to_string(path).map_err(|e| {
        BumpError::config(format!("Cannot read config file {}: {}", path.display(), e))
    })?;
    parse_config(&text)
}
