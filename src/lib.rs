//! goth - Bootstrap Goth Stack projects from the starter template
//!
//! goth clones the Goth Stack starter template, rewrites its Go module
//! path to `github.com/<account>/<project>`, and copies the result into a
//! new project directory.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to scaffold)
//! - [`scaffold`] - The fetch → strip → rewrite → materialize pipeline
//! - [`core`] - Module path identity and configuration
//! - [`ui`] - Prompts and output formatting
//!
//! # Guarantees
//!
//! 1. Invalid input is rejected before the filesystem is touched
//! 2. The scratch clone is removed on every exit path
//! 3. A failed run is reported with the step that failed; a partially
//!    copied project directory is flagged, never silently left behind

pub mod cli;
pub mod core;
pub mod scaffold;
pub mod ui;
