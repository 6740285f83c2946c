//! Schema inference module
//!
//! Infers record schemas from sampled documents.
//!
//! # Features
//!
//! - **Type Inference**: Maps every document value to a `TypeTag`
//! - **Union Reduction**: Merges observations across the sample, folding
//!   nulls into nullability and list observations into one list type
//! - **Optionality**: Tracks how many documents contain each field
//! - **Nested Records**: Registers nested documents as named records with
//!   dependency edges to their owner

mod inference;
mod naming;
mod registry;
mod types;

pub use inference::{infer_schema, infer_type, SchemaInferrer};
pub use naming::{nested_record_name, to_pascal_case};
pub use registry::SchemaRegistry;
pub use types::{FieldSchema, RecordSchema, ResolvedType, TypeSet, TypeTag};

#[cfg(test)]
mod tests;
