//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! goth has a single, user-level configuration scope. Every value has a
//! built-in default, so a missing config file is never an error.
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$GOTH_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/goth/config.toml`
//! 3. `~/.goth/config.toml` (canonical write location)
//!
//! `config set` writes back to whichever file was loaded, so a value set
//! through the CLI is the value read on the next run.
//!
//! # Example
//!
//! ```no_run
//! use goth::core::config::Config;
//!
//! let config = Config::load().unwrap();
//! println!("Template: {}", config.template_url());
//! ```

pub mod schema;

pub use schema::{GlobalConfig, TemplateConfig};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Clone URL of the Goth Stack starter template.
pub const DEFAULT_TEMPLATE_URL: &str =
    "https://github.com/dtg-lucifer/goth-stack-starter-template.git";

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "GOTH_CONFIG";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}'")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write config file '{path}'")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("home directory not found")]
    NoHomeDir,
}

/// Loaded configuration with defaults applied through accessors.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: GlobalConfig,
    /// Path to the global config file (if loaded)
    global_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the default locations.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be parsed or
    /// holds invalid values. Missing files are not an error.
    pub fn load() -> Result<Config, ConfigError> {
        match Self::locate_global() {
            Some(path) => Self::load_from(&path),
            None => Ok(Config::default()),
        }
    }

    /// Load configuration from an explicit file.
    ///
    /// A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let global = Self::read_global_config(path)?;
        global.validate()?;

        Ok(Config {
            global,
            global_path: Some(path.to_path_buf()),
        })
    }

    /// Find the first existing global config file.
    fn locate_global() -> Option<PathBuf> {
        // 1. Check $GOTH_CONFIG
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        // 2. Check $XDG_CONFIG_HOME/goth/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("goth/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        // 3. Check ~/.goth/config.toml
        dirs::home_dir()
            .map(|home| home.join(".goth/config.toml"))
            .filter(|path| path.exists())
    }

    /// Read and parse a global config file.
    fn read_global_config(path: &Path) -> Result<GlobalConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Get the path a new global config file is created at.
    ///
    /// Returns `$GOTH_CONFIG` when set, otherwise `~/.goth/config.toml`.
    pub fn global_config_path() -> Result<PathBuf, ConfigError> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".goth/config.toml"))
    }

    /// Write the global config back atomically.
    ///
    /// Targets the file this config was loaded from, or
    /// [`Config::global_config_path`] when no file was loaded.
    pub fn write_global(&self) -> Result<PathBuf, ConfigError> {
        let path = match &self.global_path {
            Some(path) => path.clone(),
            None => Self::global_config_path()?,
        };
        Self::write_to(&path, &self.global)?;
        Ok(path)
    }

    /// Write a config file atomically.
    ///
    /// Creates parent directories if needed, writes to a temp file in the
    /// same directory, then renames it into place.
    pub fn write_to(path: &Path, config: &GlobalConfig) -> Result<(), ConfigError> {
        config.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        let contents =
            toml::to_string_pretty(config).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;

        let temp_path = path.with_extension("toml.tmp");
        let mut file = fs::File::create(&temp_path).map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        file.write_all(contents.as_bytes())
            .map_err(|e| ConfigError::WriteError {
                path: temp_path.clone(),
                source: e,
            })?;

        file.sync_all().map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        fs::rename(&temp_path, path).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(())
    }

    // =========================================================================
    // Accessor methods with defaults
    // =========================================================================

    /// Get the template clone URL.
    ///
    /// Defaults to [`DEFAULT_TEMPLATE_URL`].
    pub fn template_url(&self) -> &str {
        self.global
            .template
            .as_ref()
            .and_then(|t| t.url.as_deref())
            .unwrap_or(DEFAULT_TEMPLATE_URL)
    }

    /// Get the template branch, if one is pinned.
    pub fn template_branch(&self) -> Option<&str> {
        self.global
            .template
            .as_ref()
            .and_then(|t| t.branch.as_deref())
    }

    /// Get the path to the loaded global config file.
    pub fn global_config_loaded_from(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }
}
