// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::unused_async)]

//! # mongodb-typegen
//!
//! Infers Python `TypedDict` models from sampled document collections.
//!
//! ## Features
//!
//! - **Schema Inference**: Field types, optionality and nullability from a sample
//! - **Nested Records**: Embedded documents become their own named records
//! - **Dependency Ordering**: Nested records are emitted before their users
//! - **Extended JSON**: `$oid`, `$date` and numeric wrappers from `mongoexport`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mongodb_typegen::{generator::Generator, source::JsonDirSource, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let source = JsonDirSource::connect("./dump").await?;
//!     let generator = Generator::new(source);
//!
//!     let collections = generator.list_collections().await?;
//!     let code = generator.generate_definitions(&collections, 100).await?;
//!     std::fs::write("generated_models.py", code)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   sample   ┌───────────┐   infer   ┌──────────────┐
//! │DocumentSource│ ─────────▶ │ Generator │ ────────▶ │SchemaRegistry│
//! └──────────────┘            └───────────┘           └──────┬───────┘
//!                                   ▲                        │ order
//!                                   │ render                 ▼
//!                              ┌────┴────┐            ┌────────────┐
//!                              │ Emitter │ ◀───────── │ topo order │
//!                              └─────────┘            └────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Document values and common aliases
pub mod types;

/// Schema inference and the record registry
pub mod schema;

/// Dependency ordering and Python rendering
pub mod emit;

/// Document sources
pub mod source;

/// Sampling, inference and emission driver
pub mod generator;

/// Configuration file support
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

pub use config::TypegenConfig;
pub use generator::Generator;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
