//! Generator types
//!
//! Results returned by generation runs and collection selection.

use crate::schema::RecordSchema;
use serde::Serialize;
use std::collections::BTreeSet;

/// Output of a full generation run
#[derive(Debug, Clone, Default)]
pub struct Generated {
    /// Complete Python module
    pub code: String,
    /// Emitted record names, in output order
    pub records: Vec<String>,
    /// Collections that produced a record
    pub collections: Vec<String>,
    /// Collections skipped because their sample was empty or unreadable
    pub skipped: Vec<String>,
}

/// Inferred schema of a single collection
#[derive(Debug, Clone, Serialize)]
pub struct SchemaPreview {
    /// Collection name
    pub collection: String,
    /// Inferred record schema
    pub schema: RecordSchema,
    /// `TypedDict` definition of the record
    pub rendered_definition: String,
    /// Number of documents sampled
    pub sampled_count: usize,
}

/// Collections picked for a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionSelection {
    /// Collections to process, in source order
    pub targets: Vec<String>,
    /// Requested collections the source does not have
    pub missing: Vec<String>,
}

/// Filter the available collections by an include list (empty = all) and
/// an exclude list.
pub fn select_collections(
    available: &[String],
    include: &[String],
    exclude: &[String],
) -> CollectionSelection {
    let include: Vec<&str> = include
        .iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .collect();
    let exclude: BTreeSet<&str> = exclude.iter().map(|c| c.trim()).collect();

    let (mut targets, missing) = if include.is_empty() {
        (available.to_vec(), Vec::new())
    } else {
        let targets: Vec<String> = include
            .iter()
            .filter(|c| available.iter().any(|a| a == *c))
            .map(|c| (*c).to_string())
            .collect();
        let missing: Vec<String> = include
            .iter()
            .filter(|c| !available.iter().any(|a| a == *c))
            .map(|c| (*c).to_string())
            .collect();
        (targets, missing)
    };

    targets.retain(|c| !exclude.contains(c.as_str()));
    CollectionSelection { targets, missing }
}
