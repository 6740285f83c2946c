//! Document source module
//!
//! The data-source layer the generator samples from.
//!
//! # Overview
//!
//! - `DocumentSource` - list collections and sample documents
//! - `JsonDirSource` - directory of `.json` / `.jsonl` collection exports
//! - `MemorySource` - collections held in memory

mod json_dir;
mod memory;
mod types;

pub use json_dir::{parse_export, JsonDirSource};
pub use memory::MemorySource;
pub use types::{DocumentSource, ExportFormat};

#[cfg(test)]
mod tests;
