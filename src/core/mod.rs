//! core
//!
//! Core domain types and configuration for goth.
//!
//! # Modules
//!
//! - [`identity`] - Go module path resolution
//! - [`config`] - Configuration schema and loading

pub mod config;
pub mod identity;
