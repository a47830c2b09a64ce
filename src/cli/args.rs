//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// goth - Bootstrap Goth Stack projects from the starter template
#[derive(Parser, Debug)]
#[command(name = "goth")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if goth was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new Goth Stack project
    #[command(
        name = "create",
        long_about = "Create a new Goth Stack project with the specified name in the current directory.\n\n\
            The starter template is cloned into a scratch directory, its Go module path is \
            rewritten to github.com/<username>/<project-name> in go.mod and in every .go and \
            .templ file, and the result is copied into ./<project-name>. Hidden files are \
            not copied.\n\n\
            You are asked for your GitHub username on standard input.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Create ./myapp with module path github.com/<you>/myapp
    goth create myapp

    # Non-interactive use: pipe the username in
    echo alice | goth create myapp

KNOWN LIMITATIONS:
    If copying fails midway, ./<project-name> may be left partially
    populated. Remove it before retrying."
    )]
    Create {
        /// Name of the project and of the directory to create
        project_name: String,
    },

    /// Get or set configuration values
    #[command(
        name = "config",
        long_about = "Get or set configuration values.\n\n\
            Configuration is read from $GOTH_CONFIG, $XDG_CONFIG_HOME/goth/config.toml, \
            or ~/.goth/config.toml, whichever exists first.",
        after_help = "\
WORKFLOW EXAMPLES:
    # List all configuration values
    goth config list

    # Clone from a mirror of the starter template
    goth config set template.url https://git.example.com/goth-stack-starter-template.git

    # Pin a branch or tag
    goth config set template.branch v1.2.0"
    )]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    #[command(name = "completion")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },
    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// Value to set
        value: String,
    },
    /// List all configuration values
    List,
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
