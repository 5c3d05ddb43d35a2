//! Configuration loading
//!
//! Settings are resolved in this priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! Command line and environment are merged by the binary's argument parser and
//! arrive here together as [`Overrides`]. A missing TOML file is not an error;
//! a malformed one is.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{Error, Result};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5790;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// `[server]` table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// `[catalog]` table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogSection {
    /// Directory holding movies.json, songs.json and dialogues.json.
    /// Unset means the bundled dataset.
    pub data_dir: Option<PathBuf>,
}

/// `[logging]` table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
}

/// On-disk TOML configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub catalog: CatalogSection,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub data_dir: Option<PathBuf>,
    pub log_level: Option<String>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub data_dir: Option<PathBuf>,
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            data_dir: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl ServiceConfig {
    /// Merge overrides over the TOML file over compiled defaults
    pub fn resolve(overrides: Overrides, file: Option<TomlConfig>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = ServiceConfig::default();

        Self {
            host: overrides
                .host
                .or(file.server.host)
                .unwrap_or(defaults.host),
            port: overrides.port.or(file.server.port).unwrap_or(defaults.port),
            data_dir: overrides.data_dir.or(file.catalog.data_dir),
            log_level: overrides
                .log_level
                .or(file.logging.level)
                .unwrap_or(defaults.log_level),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Platform config file location: `<config_dir>/charades/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("charades").join("config.toml"))
}

/// Parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("failed to read {}: {}", path.display(), e)))?;

    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("failed to parse {}: {}", path.display(), e)))
}

/// Load the config file if there is one
///
/// An explicitly named file must exist. The platform default is optional and
/// yields `Ok(None)` when absent.
pub fn load_optional_toml_config(explicit: Option<&Path>) -> Result<Option<TomlConfig>> {
    if let Some(path) = explicit {
        return load_toml_config(path).map(Some);
    }

    match default_config_path() {
        Some(path) if path.exists() => load_toml_config(&path).map(Some),
        _ => Ok(None),
    }
}
