//! Optional configuration file support.
//!
//! The wrappers pass every CLI token through to the delegated tool, so
//! overrides live in a YAML file (`<config_dir>/shimr/shimr.yml`) rather than
//! flags. Everything has a sensible default; a missing file is not an error.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ShimError};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Cache root override; `NUGET_PACKAGES` still takes precedence
    pub cache_root: Option<PathBuf>,
    /// Per-tool version pins overriding the built-in ones, keyed by tool name
    pub versions: HashMap<String, String>,
    /// Default log level when RUST_LOG is unset
    pub log_level: Option<String>,
}

impl Config {
    /// Load configuration from the given path, or from the default location
    /// when `path` is `None`. A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_path() {
                Some(p) => p,
                None => return Ok(Config::default()),
            },
        };

        if !path.exists() {
            debug!("no config at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&contents)
            .map_err(|e| ShimError::Config(format!("{}: {e}", path.display())))?;
        debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Default config file location: `<config_dir>/shimr/shimr.yml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("shimr").join("shimr.yml"))
    }

    /// Version pin for a tool, if the config overrides it.
    pub fn version_for(&self, tool: &str) -> Option<&str> {
        self.versions.get(tool).map(String::as_str)
    }
}
