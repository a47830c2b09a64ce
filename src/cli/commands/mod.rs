//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Validates command-specific arguments
//! 2. Calls into the library to do the work
//! 3. Formats and displays output
//!
//! Handlers return errors instead of exiting.

mod completion;
mod config_cmd;
mod create;

// Re-export command functions for testing and direct invocation
pub use completion::completion;
pub use config_cmd::{get as config_get, list as config_list, set as config_set};
pub use create::{create, create_with, ACCOUNT_PROMPT, NEXT_STEPS};

use crate::cli::args::{Command, ConfigAction};
use crate::scaffold::Context;
use anyhow::Result;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Create { project_name } => create::create(ctx, &project_name),
        Command::Config { action } => match action {
            ConfigAction::Get { key } => config_cmd::get(&key),
            ConfigAction::Set { key, value } => config_cmd::set(ctx, &key, &value),
            ConfigAction::List => config_cmd::list(),
        },
        Command::Completion { shell } => completion::completion(shell),
    }
}
