//! cli
//!
//! Command-line interface layer for goth.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Build the execution context
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and dispatches to
//! [`crate::scaffold`] for the actual work. Errors propagate back to
//! `main`, which is the only place that prints them and picks the exit
//! status.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use crate::scaffold::Context;
use crate::ui::output::Verbosity;
use anyhow::{Context as _, Result};

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let cwd = match cli.cwd.clone() {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };

    let mut ctx = Context::new(cwd);
    ctx.verbosity = Verbosity::from_flags(cli.quiet, cli.debug);

    commands::dispatch(cli.command, &ctx)
}
