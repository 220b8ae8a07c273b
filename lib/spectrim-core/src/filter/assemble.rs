//! Final document assembly.

use serde_json::{Map, Value};

/// Composes the output document from the filtered pieces and the passthrough
/// sections of the source.
///
/// `openapi`, `info`, `servers`, and `components.securitySchemes` are copied
/// verbatim; `servers` defaults to an empty array. The result is kept
/// minimal: top-level nulls are dropped, an empty `tags` array is dropped,
/// empty `components.schemas`/`components.securitySchemes` sections are
/// dropped, and `components` disappears entirely once it has nothing left.
/// `paths` is always present, even when empty.
pub fn assemble_document(
    source: &Map<String, Value>,
    tag_definitions: Vec<Value>,
    filtered_paths: Map<String, Value>,
    filtered_schemas: Map<String, Value>,
) -> Value {
    let mut document = Map::new();

    if let Some(openapi) = source.get("openapi") {
        document.insert("openapi".to_string(), openapi.clone());
    }
    if let Some(info) = source.get("info") {
        document.insert("info".to_string(), info.clone());
    }
    document.insert(
        "servers".to_string(),
        source
            .get("servers")
            .cloned()
            .unwrap_or_else(|| Value::Array(Vec::new())),
    );
    document.insert("tags".to_string(), Value::Array(tag_definitions));
    document.insert("paths".to_string(), Value::Object(filtered_paths));

    let security_schemes = source
        .get("components")
        .and_then(Value::as_object)
        .and_then(|components| components.get("securitySchemes"))
        .cloned()
        .unwrap_or_else(|| Value::Object(Map::new()));

    let mut components = Map::new();
    components.insert("schemas".to_string(), Value::Object(filtered_schemas));
    components.insert("securitySchemes".to_string(), security_schemes);
    components.retain(|_, section| !is_empty_section(section));
    if !components.is_empty() {
        document.insert("components".to_string(), Value::Object(components));
    }

    document.retain(|key, value| !value.is_null() && !(key == "tags" && is_empty_section(value)));

    Value::Object(document)
}

/// An optional section is pruned when it carries no content at all.
fn is_empty_section(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(entries) => entries.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::String(text) => text.is_empty(),
        _ => false,
    }
}
