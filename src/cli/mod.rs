//! CLI module
//!
//! Command-line interface for generating models.
//!
//! # Commands
//!
//! - `generate` - Sample collections and write TypedDict models
//! - `list-collections` - List collections in the source
//! - `preview` - Show the inferred schema of one collection

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
