//! Transitive closure of schema references.

use std::collections::BTreeSet;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::refs::{SCHEMA_REF_PREFIX, find_refs};

/// Rounds of dependency scanning before the closure is cut off.
const MAX_CLOSURE_ROUNDS: usize = 10;

/// Computes the set of schema names reachable from the filtered paths.
///
/// The seed is every `#/components/schemas/` reference inside
/// `filtered_paths`. Each round scans only the schemas newly added in the
/// previous round, so a schema body is visited at most once. Names that do
/// not exist in `schemas` stay in the result untouched: references dangling
/// in the source are tolerated, not healed.
///
/// The scan stops once no new names appear, or after 10 rounds; hitting the
/// bound with work remaining logs a warning because the closure may then be
/// incomplete.
pub fn resolve_schema_closure(
    filtered_paths: &Map<String, Value>,
    schemas: &Map<String, Value>,
) -> BTreeSet<String> {
    let mut reachable = BTreeSet::new();
    for path_item in filtered_paths.values() {
        reachable.extend(find_refs(path_item, SCHEMA_REF_PREFIX));
    }
    debug!(seed = reachable.len(), "references found in filtered paths");

    let mut frontier = reachable.clone();
    let mut rounds = 0;
    while !frontier.is_empty() {
        if rounds == MAX_CLOSURE_ROUNDS {
            warn!(
                rounds,
                pending = frontier.len(),
                "schema dependency resolution cut off, the closure may be incomplete"
            );
            break;
        }
        rounds += 1;

        let mut next = BTreeSet::new();
        for name in &frontier {
            let Some(schema) = schemas.get(name) else {
                continue;
            };
            for reference in find_refs(schema, SCHEMA_REF_PREFIX) {
                if reachable.insert(reference.clone()) {
                    next.insert(reference);
                }
            }
        }
        frontier = next;
    }
    debug!(total = reachable.len(), rounds, "schema closure resolved");

    reachable
}

/// Reduces a schema map to the reachable names, preserving the source
/// key order.
pub fn filter_schemas(
    schemas: &Map<String, Value>,
    reachable: &BTreeSet<String>,
) -> Map<String, Value> {
    schemas
        .iter()
        .filter(|(name, _)| reachable.contains(name.as_str()))
        .map(|(name, schema)| (name.clone(), schema.clone()))
        .collect()
}
