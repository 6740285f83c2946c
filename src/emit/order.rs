//! Dependency ordering of record definitions

use crate::schema::SchemaRegistry;
use std::collections::{BTreeMap, VecDeque};
use tracing::warn;

/// Order record names so every nested record precedes the records that
/// reference it.
///
/// Kahn's algorithm over the reversed dependency edges. Ties drain in name
/// order. A cycle cannot come out of document nesting, but if one shows up
/// the whole registry falls back to plain name order.
pub fn order(registry: &SchemaRegistry) -> Vec<String> {
    let names: Vec<&str> = registry.names().collect();

    let mut in_degree: BTreeMap<&str, usize> = names.iter().map(|name| (*name, 0)).collect();
    // nested -> owners waiting on it
    let mut dependents: BTreeMap<&str, Vec<&str>> = BTreeMap::new();

    for (owner, nested) in registry.dependencies() {
        if owner == nested || !in_degree.contains_key(nested) {
            continue;
        }
        if let Some(degree) = in_degree.get_mut(owner) {
            *degree += 1;
            dependents.entry(nested).or_default().push(owner);
        }
    }

    let mut queue: VecDeque<&str> = in_degree
        .iter()
        .filter(|(_, degree)| **degree == 0)
        .map(|(name, _)| *name)
        .collect();

    let mut sorted = Vec::with_capacity(names.len());
    while let Some(name) = queue.pop_front() {
        sorted.push(name.to_string());

        for owner in dependents.get(name).into_iter().flatten() {
            if let Some(degree) = in_degree.get_mut(owner) {
                *degree -= 1;
                if *degree == 0 {
                    queue.push_back(*owner);
                }
            }
        }
    }

    if sorted.len() == names.len() {
        return sorted;
    }

    let stuck: Vec<&str> = in_degree
        .iter()
        .filter(|(_, degree)| **degree > 0)
        .map(|(name, _)| *name)
        .collect();
    warn!(
        records = ?stuck,
        "Dependency cycle between records, falling back to name order"
    );
    names.into_iter().map(String::from).collect()
}
