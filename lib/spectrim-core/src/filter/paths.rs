//! Path and operation filtering by tag.

use std::collections::BTreeSet;

use serde_json::{Map, Value};
use tracing::warn;

use super::operation_id::OperationIdRegistry;

/// Path item keys treated as operations, in resolution order.
pub const HTTP_METHODS: &[&str] = &[
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// Reduces a `paths` map to the path items with at least one kept operation.
///
/// An operation is kept when it carries a non-empty `tags` array
/// intersecting `desired_tags` and is not marked `deprecated`. Sibling keys
/// of a path item (`parameters`, `summary`, …) are copied through only when
/// the path item survives; a path item with no kept operation is dropped
/// entirely. Kept operations get their `operationId` resolved against
/// `registry` on the way out, so the returned map is ready for assembly.
///
/// Path items and operation values that are not objects are skipped with a
/// warning; malformed input never aborts the pass.
pub fn filter_paths(
    paths: &Map<String, Value>,
    desired_tags: &BTreeSet<String>,
    registry: &mut OperationIdRegistry,
) -> Map<String, Value> {
    let mut filtered = Map::new();

    for (path, path_item) in paths {
        let Some(item) = path_item.as_object() else {
            warn!(%path, "path item is not an object, skipping");
            continue;
        };

        let mut kept_operations = Map::new();
        for method in HTTP_METHODS {
            let Some(candidate) = item.get(*method) else {
                continue;
            };
            let Some(operation) = candidate.as_object() else {
                warn!(%path, %method, "operation is not an object, skipping");
                continue;
            };
            if !should_keep(operation, desired_tags) {
                continue;
            }
            let resolved = with_resolved_operation_id(operation, path, method, registry);
            kept_operations.insert((*method).to_string(), Value::Object(resolved));
        }

        if kept_operations.is_empty() {
            continue;
        }

        // Sibling keys first, then the kept operations, mirroring the
        // original key layout as closely as the rebuild allows.
        let mut rebuilt = Map::new();
        for (key, value) in item {
            if !HTTP_METHODS.contains(&key.as_str()) {
                rebuilt.insert(key.clone(), value.clone());
            }
        }
        rebuilt.extend(kept_operations);
        filtered.insert(path.clone(), Value::Object(rebuilt));
    }

    filtered
}

/// An operation survives iff its tag list is a non-empty array intersecting
/// the desired set, and it is not deprecated.
fn should_keep(operation: &Map<String, Value>, desired_tags: &BTreeSet<String>) -> bool {
    if operation
        .get("deprecated")
        .and_then(Value::as_bool)
        .unwrap_or(false)
    {
        return false;
    }
    let Some(tags) = operation.get("tags").and_then(Value::as_array) else {
        return false;
    };
    tags.iter()
        .filter_map(Value::as_str)
        .any(|tag| desired_tags.contains(tag))
}

/// Returns a copy of the operation with its `operationId` resolved for
/// uniqueness within the primary-tag scope.
///
/// Operations without an identifier pass through untouched (reported as a
/// warning); the identifier is rewritten only when resolution actually
/// changed it.
fn with_resolved_operation_id(
    operation: &Map<String, Value>,
    path: &str,
    method: &str,
    registry: &mut OperationIdRegistry,
) -> Map<String, Value> {
    let mut rebuilt = operation.clone();

    let Some(raw_id) = operation.get("operationId").and_then(Value::as_str) else {
        warn!(%path, %method, "operation has no operationId");
        return rebuilt;
    };

    let primary_tag = operation
        .get("tags")
        .and_then(Value::as_array)
        .and_then(|tags| tags.first())
        .and_then(Value::as_str)
        .unwrap_or_default();

    let resolved = registry.resolve(primary_tag, raw_id);
    if resolved != raw_id {
        rebuilt.insert("operationId".to_string(), Value::String(resolved));
    }
    rebuilt
}
