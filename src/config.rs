//! Configuration file support for yarnpack.
//!
//! Options can be stored in a `yarnpack.toml` next to the project:
//!
//! ```toml
//! no_frozen_lockfile = false
//! ignore_scripts = true
//! network_concurrency = 8
//!
//! [[ignored_errors]]
//! prefix = "YN0060"
//! log = true
//! ```
//!
//! Values given on the command line take precedence.

use crate::error::ConfigError;
use crate::packager::PackagerOptions;
use crate::recovery::IgnoredError;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// File name looked up in the working directory
pub const CONFIG_FILENAME: &str = "yarnpack.toml";

/// Top-level configuration file schema.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub no_frozen_lockfile: Option<bool>,
    pub ignore_scripts: Option<bool>,
    pub network_concurrency: Option<u32>,
    #[serde(default)]
    pub ignored_errors: Vec<IgnoredError>,
}

impl ConfigFile {
    /// Install options described by this file
    pub fn packager_options(&self) -> PackagerOptions {
        PackagerOptions {
            no_frozen_lockfile: self.no_frozen_lockfile.unwrap_or(false),
            ignore_scripts: self.ignore_scripts.unwrap_or(false),
            network_concurrency: self.network_concurrency,
        }
    }
}

/// Parse configuration text; `path` is used for error messages only
pub fn parse_config(content: &str, path: &Path) -> Result<ConfigFile, ConfigError> {
    let config: ConfigFile =
        toml::from_str(content).map_err(|e| ConfigError::parse_error(path, e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile, ConfigError> {
    let content =
        std::fs::read_to_string(path).map_err(|e| ConfigError::read_error(path, e))?;
    debug!(path = %path.display(), "loaded config file");
    parse_config(&content, path)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>, ConfigError> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    load_config_from_path(&config_path).map(Some)
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<(), ConfigError> {
    if config.network_concurrency == Some(0) {
        return Err(ConfigError::invalid_value(
            "network_concurrency",
            "must be at least 1",
        ));
    }

    for (i, entry) in config.ignored_errors.iter().enumerate() {
        if entry.prefix.trim().is_empty() {
            return Err(ConfigError::invalid_value(
                format!("ignored_errors[{}].prefix", i),
                "must not be empty",
            ));
        }
    }
    Ok(())
}
