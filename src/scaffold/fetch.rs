//! scaffold::fetch
//!
//! Retrieval of the template tree.
//!
//! # Design
//!
//! Fetching is an external collaborator behind the [`TreeFetcher`] trait:
//! given a source and a destination path, produce a directory tree there.
//! The production fetcher shells out to `git clone`; tests substitute
//! fetchers that write fixture trees or fail on purpose.
//!
//! A fetch either succeeds completely or fails; there is no retry.

use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

use thiserror::Error;

use crate::core::config::Config;

/// Errors from fetching the template.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The fetch program could not be started.
    #[error("could not run '{program}'")]
    Spawn {
        /// Program that failed to start
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The fetch program ran and reported failure.
    #[error("'{program}' exited with {status}{}", detail_suffix(.detail))]
    Failed {
        /// Program that failed
        program: String,
        /// Exit status description
        status: String,
        /// Last line of diagnostic output, if any
        detail: Option<String>,
    },
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map(|d| format!(": {d}"))
        .unwrap_or_default()
}

/// Where to fetch the template from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSource {
    /// Clone URL or local path
    pub url: String,
    /// Branch or tag; `None` means the remote default
    pub branch: Option<String>,
}

impl TemplateSource {
    /// Source for a URL at its default branch.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            branch: None,
        }
    }

    /// Source described by the loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            url: config.template_url().to_string(),
            branch: config.template_branch().map(str::to_string),
        }
    }
}

/// Retrieves a snapshot of a template tree.
pub trait TreeFetcher {
    /// Populate `dest` with the tree described by `source`.
    ///
    /// `dest` does not exist yet; its parent does.
    fn fetch(&self, source: &TemplateSource, dest: &Path) -> Result<(), FetchError>;
}

/// Fetcher backed by the `git` executable.
#[derive(Debug, Clone)]
pub struct GitCliFetcher {
    program: OsString,
}

impl Default for GitCliFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl GitCliFetcher {
    /// Use `git` from `PATH`.
    pub fn new() -> Self {
        Self::with_program("git")
    }

    /// Use a specific git binary.
    pub fn with_program(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn command(&self, source: &TemplateSource, dest: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        // Never block on a credential prompt for a missing or private repo.
        cmd.env("GIT_TERMINAL_PROMPT", "0");
        cmd.args(["clone", "--quiet", "--depth", "1"]);
        if let Some(branch) = &source.branch {
            cmd.arg("--branch").arg(branch);
        }
        cmd.arg("--").arg(&source.url).arg(dest);
        cmd
    }
}

impl TreeFetcher for GitCliFetcher {
    fn fetch(&self, source: &TemplateSource, dest: &Path) -> Result<(), FetchError> {
        let program = self.program.to_string_lossy().into_owned();

        let output = self
            .command(source, dest)
            .output()
            .map_err(|source| FetchError::Spawn {
                program: program.clone(),
                source,
            })?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let detail = stderr
            .lines()
            .map(str::trim)
            .rfind(|line| !line.is_empty())
            .map(str::to_string);

        Err(FetchError::Failed {
            program: format!("{program} clone"),
            status: output.status.to_string(),
            detail,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args_of(cmd: &Command) -> Vec<String> {
        cmd.get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn clone_command_is_shallow_and_quiet() {
        let fetcher = GitCliFetcher::new();
        let source = TemplateSource::new("https://example.com/t.git");
        let cmd = fetcher.command(&source, Path::new("/tmp/scratch/template"));

        assert_eq!(cmd.get_program(), "git");
        assert_eq!(
            args_of(&cmd),
            [
                "clone",
                "--quiet",
                "--depth",
                "1",
                "--",
                "https://example.com/t.git",
                "/tmp/scratch/template"
            ]
        );
    }

    #[test]
    fn clone_command_pins_branch() {
        let fetcher = GitCliFetcher::new();
        let source = TemplateSource {
            url: "/srv/template".into(),
            branch: Some("v2".into()),
        };
        let args = args_of(&fetcher.command(&source, Path::new("dest")));

        let pos = args.iter().position(|a| a == "--branch").unwrap();
        assert_eq!(args[pos + 1], "v2");
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let fetcher = GitCliFetcher::with_program("goth-test-no-such-git-binary");
        let dest = PathBuf::from("unused");

        let err = fetcher
            .fetch(&TemplateSource::new("https://example.com/t.git"), &dest)
            .unwrap_err();

        assert!(matches!(err, FetchError::Spawn { .. }));
    }

    #[test]
    fn failed_message_includes_detail() {
        let err = FetchError::Failed {
            program: "git clone".into(),
            status: "exit status: 128".into(),
            detail: Some("fatal: repository not found".into()),
        };
        assert_eq!(
            err.to_string(),
            "'git clone' exited with exit status: 128: fatal: repository not found"
        );
    }
}
