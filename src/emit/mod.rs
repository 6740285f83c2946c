//! Definition emitter module
//!
//! Turns the registry of inferred records into Python source.
//!
//! # Overview
//!
//! - `order` - dependency order, nested records first
//! - `Emitter` - renders `TypedDict` definitions and the full module

mod order;
mod render;

pub use order::order;
pub use render::{python_str_literal, Emitter, HEADER, PREAMBLE};
