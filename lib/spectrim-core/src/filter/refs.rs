//! Recursive `$ref` scanning over untyped JSON trees.

use std::collections::BTreeSet;

use serde_json::Value;

/// Reference prefix for named schema components.
pub const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// Collects every local reference name below `value` whose `$ref` target
/// starts with `prefix`.
///
/// Objects and arrays are the only recursive containers; scalars terminate
/// the walk, so any non-container input yields the empty set. An object
/// carrying `$ref` is still scanned in full: its other keys may hold further
/// references under malformed or exotic input.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use spectrim_core::filter::{SCHEMA_REF_PREFIX, find_refs};
///
/// let tree = json!({"schema": {"$ref": "#/components/schemas/User"}});
/// let refs = find_refs(&tree, SCHEMA_REF_PREFIX);
/// assert!(refs.contains("User"));
/// ```
pub fn find_refs(value: &Value, prefix: &str) -> BTreeSet<String> {
    let mut refs = BTreeSet::new();
    collect_refs(value, prefix, &mut refs);
    refs
}

fn collect_refs(value: &Value, prefix: &str, refs: &mut BTreeSet<String>) {
    match value {
        Value::Object(object) => {
            if let Some(target) = object.get("$ref").and_then(Value::as_str) {
                if let Some(name) = target.strip_prefix(prefix) {
                    refs.insert(name.to_string());
                }
            }
            for nested in object.values() {
                collect_refs(nested, prefix, refs);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_refs(item, prefix, refs);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn should_find_nested_references() {
        let tree = json!({
            "responses": {
                "200": {
                    "content": {
                        "application/json": {
                            "schema": {"$ref": "#/components/schemas/Repository"}
                        }
                    }
                }
            },
            "parameters": [
                {"schema": {"$ref": "#/components/schemas/PageRequest"}}
            ]
        });

        let refs = find_refs(&tree, SCHEMA_REF_PREFIX);

        assert_eq!(
            refs,
            BTreeSet::from(["Repository".to_string(), "PageRequest".to_string()])
        );
    }

    #[test]
    fn should_ignore_references_with_other_prefixes() {
        let tree = json!({
            "schema": {"$ref": "#/components/responses/NotFound"},
            "other": {"$ref": "#/components/schemas/Kept"}
        });

        let refs = find_refs(&tree, SCHEMA_REF_PREFIX);

        assert_eq!(refs, BTreeSet::from(["Kept".to_string()]));
    }

    #[test]
    fn should_scan_sibling_keys_of_a_ref_object() {
        let tree = json!({
            "$ref": "#/components/schemas/Outer",
            "extra": {"$ref": "#/components/schemas/Inner"}
        });

        let refs = find_refs(&tree, SCHEMA_REF_PREFIX);

        assert_eq!(
            refs,
            BTreeSet::from(["Outer".to_string(), "Inner".to_string()])
        );
    }

    #[test]
    fn should_return_empty_set_for_scalars() {
        assert!(find_refs(&json!("#/components/schemas/NotARef"), SCHEMA_REF_PREFIX).is_empty());
        assert!(find_refs(&json!(42), SCHEMA_REF_PREFIX).is_empty());
        assert!(find_refs(&Value::Null, SCHEMA_REF_PREFIX).is_empty());
    }

    #[test]
    fn should_ignore_non_string_ref_values() {
        let tree = json!({"$ref": ["#/components/schemas/NotAString"]});

        assert!(find_refs(&tree, SCHEMA_REF_PREFIX).is_empty());
    }
}
