//! Configuration management for tmu
//!
//! Settings for the browser UI server and for file exports, read from
//! `.tmu/config.toml`. Every field has a default so a missing file, a missing
//! section or a missing key all fall back to working values.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::{Result, TmuError};

/// Directory holding the configuration, relative to the project root
pub const CONFIG_DIR: &str = ".tmu";

/// Configuration file name inside [`CONFIG_DIR`]
pub const CONFIG_FILE: &str = "config.toml";

/// Project-level tmu configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmuConfig {
    /// Browser UI server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,
}

/// Browser UI server settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to serve on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Open the browser after the server starts
    #[serde(default = "default_open_browser")]
    pub open_browser: bool,
}

/// Export settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory that CLI exports are written to when `--out` is not given
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

// Default value providers
fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8501
}

fn default_open_browser() -> bool {
    true
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("exports")
}

impl TmuConfig {
    /// Path of the configuration file under a project root
    pub fn path(root: &Path) -> PathBuf {
        root.join(CONFIG_DIR).join(CONFIG_FILE)
    }

    /// Load configuration from `.tmu/config.toml` or use defaults
    pub fn load_or_default(root: &Path) -> Result<Self> {
        let config_path = Self::path(root);

        if config_path.exists() {
            debug!("Loading config from {:?}", config_path);
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)
                .map_err(|e| TmuError::Config(format!("Failed to parse config file: {}", e)))
        } else {
            debug!("No config at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Write default configuration to `.tmu/config.toml`
    ///
    /// Returns the path written.
    pub fn write_default(root: &Path) -> Result<PathBuf> {
        let config_dir = root.join(CONFIG_DIR);
        std::fs::create_dir_all(&config_dir)?;

        let config_path = config_dir.join(CONFIG_FILE);
        let content = toml::to_string_pretty(&Self::default())
            .map_err(|e| TmuError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(&config_path, content)?;
        Ok(config_path)
    }
}

impl Default for TmuConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            export: ExportConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            open_browser: default_open_browser(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}
