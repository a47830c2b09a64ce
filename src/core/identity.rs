//! core::identity
//!
//! Module identity strings for the Goth Stack template.
//!
//! # Overview
//!
//! A module identity is a Go module path of the form
//! `<host>/<account>/<project>`. The starter template ships with
//! [`TEMPLATE_MODULE`]; a new project gets a path resolved from the
//! user's account and the project name.
//!
//! Both forms use `/` as the separator so that swapping one for the
//! other is a pure text operation.
//!
//! # Example
//!
//! ```
//! use goth::core::identity::{resolve, TEMPLATE_MODULE};
//!
//! let module = resolve("alice", "myapp").unwrap();
//! assert_eq!(module.as_str(), "github.com/alice/myapp");
//! assert_ne!(module.as_str(), TEMPLATE_MODULE);
//!
//! assert!(resolve("  ", "myapp").is_err());
//! ```

use std::fmt;
use std::path::{Component, Path};

use thiserror::Error;

/// Host every module path lives under.
pub const MODULE_HOST: &str = "github.com";

/// Module path declared by the starter template.
pub const TEMPLATE_MODULE: &str = "github.com/dtg-lucifer/goth-stack-starter";

/// Errors from identity resolution.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("{field} cannot be empty")]
    Empty {
        /// Which input was empty ("project name" or "GitHub username").
        field: &'static str,
    },

    #[error("project name '{name}' must be a single directory name")]
    NotADirectoryName { name: String },
}

/// A resolved Go module path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModulePath(String);

impl ModulePath {
    /// Get the module path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModulePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ModulePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Trim a user-supplied token and reject it if nothing is left.
pub fn non_empty<'a>(value: &'a str, field: &'static str) -> Result<&'a str, IdentityError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(IdentityError::Empty { field });
    }
    Ok(trimmed)
}

/// Validate a project name as the directory it is created in.
///
/// The trimmed name must be exactly one plain path component, so that the
/// project always lands directly under the working directory. Absolute
/// paths, nested paths, `.` and `..` are rejected.
pub fn project_dir_name(project_name: &str) -> Result<&str, IdentityError> {
    let name = non_empty(project_name, "project name")?;
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) if !name.contains(|c: char| c == '/' || c == '\\') => {
            Ok(name)
        }
        _ => Err(IdentityError::NotADirectoryName {
            name: name.to_string(),
        }),
    }
}

/// Resolve the module path for a new project.
///
/// # Errors
///
/// Returns [`IdentityError::Empty`] if either input is empty after
/// trimming surrounding whitespace, and
/// [`IdentityError::NotADirectoryName`] if the project name is not a
/// single directory name.
pub fn resolve(account: &str, project_name: &str) -> Result<ModulePath, IdentityError> {
    let project = project_dir_name(project_name)?;
    let account = non_empty(account, "GitHub username")?;
    Ok(ModulePath(format!("{MODULE_HOST}/{account}/{project}")))
}
