//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Global Config
//!
//! Located at (in order of precedence):
//! 1. `$GOTH_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/goth/config.toml`
//! 3. `~/.goth/config.toml` (canonical write location)
//!
//! # Validation
//!
//! Config values are validated after parsing. Empty strings are rejected
//! rather than silently treated as "unset".

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Global configuration (user scope).
///
/// # Example
///
/// ```toml
/// [template]
/// url = "https://github.com/dtg-lucifer/goth-stack-starter-template.git"
/// branch = "main"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Template source settings
    pub template: Option<TemplateConfig>,
}

impl GlobalConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(template) = &self.template {
            template.validate()?;
        }
        Ok(())
    }
}

/// Where the starter template is cloned from.
///
/// A mirror or fork is expected to keep the template's module path, since
/// only that one identity string is rewritten.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct TemplateConfig {
    /// Clone URL (any URL or local path `git clone` accepts)
    pub url: Option<String>,

    /// Branch or tag to clone instead of the remote default
    pub branch: Option<String>,
}

impl TemplateConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if matches!(&self.url, Some(url) if url.trim().is_empty()) {
            return Err(ConfigError::InvalidValue(
                "template.url cannot be empty".into(),
            ));
        }
        if let Some(branch) = &self.branch {
            if branch.trim().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "template.branch cannot be empty".into(),
                ));
            }
            if branch.starts_with('-') {
                return Err(ConfigError::InvalidValue(format!(
                    "template.branch cannot start with '-': {branch}"
                )));
            }
        }
        Ok(())
    }
}
