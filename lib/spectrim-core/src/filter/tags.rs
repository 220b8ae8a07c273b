//! Top-level tag catalogue filtering.

use std::collections::BTreeSet;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::paths::HTTP_METHODS;

/// Unions the `tags` arrays of every kept operation in the filtered paths.
pub fn used_tag_names(filtered_paths: &Map<String, Value>) -> BTreeSet<String> {
    let mut used = BTreeSet::new();

    for path_item in filtered_paths.values() {
        let Some(item) = path_item.as_object() else {
            continue;
        };
        for method in HTTP_METHODS {
            let Some(tags) = item
                .get(*method)
                .and_then(Value::as_object)
                .and_then(|operation| operation.get("tags"))
                .and_then(Value::as_array)
            else {
                continue;
            };
            used.extend(tags.iter().filter_map(Value::as_str).map(ToString::to_string));
        }
    }

    used
}

/// Reduces the top-level `tags` catalogue to the definitions whose `name`
/// is actually used by a kept operation.
///
/// Entries that are not objects, or lack a string `name`, are dropped. An
/// absent catalogue yields an empty result; a catalogue of the wrong shape
/// does too, with a warning.
pub fn filter_tag_definitions(catalogue: Option<&Value>, used: &BTreeSet<String>) -> Vec<Value> {
    let definitions = match catalogue {
        Some(Value::Array(definitions)) => definitions,
        Some(_) => {
            warn!("top-level tags is not an array, dropping tag definitions");
            return Vec::new();
        }
        None => {
            debug!("document has no top-level tags catalogue");
            return Vec::new();
        }
    };

    definitions
        .iter()
        .filter(|definition| {
            definition
                .as_object()
                .and_then(|entry| entry.get("name"))
                .and_then(Value::as_str)
                .is_some_and(|name| used.contains(name))
        })
        .cloned()
        .collect()
}
