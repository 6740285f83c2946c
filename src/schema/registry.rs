//! Run-scoped registry of named record schemas

use super::types::RecordSchema;
use std::collections::{BTreeMap, BTreeSet};

/// State of a record name in the registry
#[derive(Debug, Clone, PartialEq)]
enum Slot {
    /// Name reserved, body still being inferred
    Claimed,
    /// Schema fully inferred
    Resolved(RecordSchema),
}

/// Named record schemas discovered during one generation run, plus the
/// dependency edges between them.
///
/// A name is claimed before its schema is computed, so a recursive lookup
/// of the same name sees it as taken and stops descending.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    slots: BTreeMap<String, Slot>,
    /// owner -> records it references
    edges: BTreeMap<String, BTreeSet<String>>,
}

impl SchemaRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every record and edge
    pub fn clear(&mut self) {
        self.slots.clear();
        self.edges.clear();
    }

    /// Reserve a name. Returns `false` if it was already claimed.
    pub fn claim(&mut self, name: &str) -> bool {
        if self.slots.contains_key(name) {
            return false;
        }
        self.slots.insert(name.to_string(), Slot::Claimed);
        true
    }

    /// Check if a name is claimed or resolved
    pub fn is_claimed(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    /// Store a finished schema under its name
    pub fn resolve(&mut self, schema: RecordSchema) {
        self.slots
            .insert(schema.name.clone(), Slot::Resolved(schema));
    }

    /// Record that `owner` references `nested`. Self references are ignored.
    pub fn add_dependency(&mut self, owner: &str, nested: &str) {
        if owner == nested {
            return;
        }
        self.edges
            .entry(owner.to_string())
            .or_default()
            .insert(nested.to_string());
    }

    /// Records referenced by `owner`
    pub fn dependencies_of(&self, owner: &str) -> impl Iterator<Item = &str> {
        self.edges
            .get(owner)
            .into_iter()
            .flat_map(|deps| deps.iter().map(String::as_str))
    }

    /// All `(owner, nested)` edges, ordered by owner then nested name
    pub fn dependencies(&self) -> impl Iterator<Item = (&str, &str)> {
        self.edges.iter().flat_map(|(owner, deps)| {
            deps.iter()
                .map(move |nested| (owner.as_str(), nested.as_str()))
        })
    }

    /// Get a resolved schema
    pub fn get(&self, name: &str) -> Option<&RecordSchema> {
        match self.slots.get(name) {
            Some(Slot::Resolved(schema)) => Some(schema),
            _ => None,
        }
    }

    /// Names of every claimed or resolved record, in name order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }

    /// Resolved schemas, in name order
    pub fn schemas(&self) -> impl Iterator<Item = &RecordSchema> {
        self.slots.values().filter_map(|slot| match slot {
            Slot::Resolved(schema) => Some(schema),
            Slot::Claimed => None,
        })
    }

    /// Number of claimed names
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if nothing has been claimed
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
