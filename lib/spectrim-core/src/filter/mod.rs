//! OpenAPI tag-subset filtering.
//!
//! This module reduces a full OpenAPI v3 document to the operations carrying
//! a desired set of tags, then prunes everything that only existed to serve
//! the dropped operations:
//!
//! - path items with no surviving operation disappear;
//! - `components.schemas` shrinks to the transitive closure of `$ref`
//!   reachable from the survivors;
//! - the top-level `tags` catalogue shrinks to the names still in use;
//! - colliding `operationId` values are renamed deterministically within
//!   their primary-tag scope.
//!
//! The document is handled as an untyped JSON tree throughout, so no part of
//! the pass validates or depends on OpenAPI structure beyond the keys it
//! filters; malformed shapes degrade to logged fallbacks instead of errors.
//!
//! # Example
//!
//! ```rust,ignore
//! use spectrim_core::{TagFilter, TagFilterExt};
//!
//! let document: serde_json::Value = /* your loaded OpenAPI document */;
//! let filtered = document.filter_tags(&TagFilter::new(["Repository"]));
//! std::fs::write("subset.json", serde_json::to_string_pretty(&filtered)?)?;
//! ```

use std::collections::BTreeSet;

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

mod assemble;
mod closure;
mod operation_id;
mod paths;
mod refs;
mod tags;

use assemble::assemble_document;
use closure::{filter_schemas, resolve_schema_closure};
use tags::{filter_tag_definitions, used_tag_names};

pub use operation_id::{FALLBACK_OPERATION_ID, OperationIdRegistry, sanitize_operation_id};
pub use paths::{HTTP_METHODS, filter_paths};
pub use refs::{SCHEMA_REF_PREFIX, find_refs};

/// Tag names selected when no explicit set is configured.
pub const DEFAULT_TAGS: &[&str] = &["Project", "Pull Requests", "Repository", "Authentication"];

/// Filters an OpenAPI document down to the operations carrying a set of
/// desired tags.
///
/// The filter is deterministic: identical inputs produce identical outputs
/// and identical logged anomalies. It never fails on malformed document
/// shapes; every structural surprise has a defined fallback (see the module
/// documentation).
#[derive(Debug, Clone)]
pub struct TagFilter {
    desired_tags: BTreeSet<String>,
}

impl TagFilter {
    /// Creates a filter keeping operations tagged with any of `tags`.
    pub fn new<I, T>(tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            desired_tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    /// The tag names this filter keeps.
    pub fn desired_tags(&self) -> &BTreeSet<String> {
        &self.desired_tags
    }

    /// Produces the filtered document.
    ///
    /// The source tree is read, never mutated; the result is a freshly
    /// assembled tree sharing no state with previous runs. A root that is
    /// not an object is treated as an empty document (with a warning), and
    /// missing `paths` or `components.schemas` sections default to empty
    /// maps.
    #[must_use]
    pub fn filter(&self, document: &Value) -> Value {
        let empty = Map::new();
        let root = match document.as_object() {
            Some(root) => root,
            None => {
                warn!("document root is not an object, producing an empty document");
                &empty
            }
        };

        let source_paths = root.get("paths").and_then(Value::as_object).unwrap_or(&empty);
        let source_schemas = root
            .get("components")
            .and_then(Value::as_object)
            .and_then(|components| components.get("schemas"))
            .and_then(Value::as_object)
            .unwrap_or(&empty);

        let mut registry = OperationIdRegistry::default();
        let filtered_paths = filter_paths(source_paths, &self.desired_tags, &mut registry);
        info!(
            kept = filtered_paths.len(),
            total = source_paths.len(),
            "paths filtered"
        );

        let used = used_tag_names(&filtered_paths);
        debug!(count = used.len(), "unique tags used by kept operations");
        let tag_definitions = filter_tag_definitions(root.get("tags"), &used);
        info!(kept = tag_definitions.len(), "tag definitions filtered");

        let reachable = resolve_schema_closure(&filtered_paths, source_schemas);
        let filtered_schemas = filter_schemas(source_schemas, &reachable);
        info!(
            kept = filtered_schemas.len(),
            total = source_schemas.len(),
            "schemas filtered"
        );

        assemble_document(root, tag_definitions, filtered_paths, filtered_schemas)
    }
}

impl Default for TagFilter {
    fn default() -> Self {
        Self::new(DEFAULT_TAGS.iter().copied())
    }
}

/// Extension trait for filtering documents in place of a free function call.
pub trait TagFilterExt {
    /// Filters this document with the provided filter.
    ///
    /// Convenience for `filter.filter(self)`.
    fn filter_tags(&self, filter: &TagFilter) -> Value;
}

impl TagFilterExt for Value {
    fn filter_tags(&self, filter: &TagFilter) -> Value {
        filter.filter(self)
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;
    use serde_json::json;

    use super::*;

    #[test]
    fn should_use_the_default_tag_set() {
        let filter = TagFilter::default();

        assert_eq!(
            filter.desired_tags(),
            &BTreeSet::from([
                "Project".to_string(),
                "Pull Requests".to_string(),
                "Repository".to_string(),
                "Authentication".to_string(),
            ])
        );
    }

    #[test]
    fn should_produce_an_empty_document_for_a_non_object_root() {
        let filtered = TagFilter::default().filter(&json!(["not", "a", "document"]));

        assert_eq!(filtered, json!({"servers": [], "paths": {}}));
    }

    #[test]
    fn should_filter_through_the_extension_trait() {
        let document = json!({
            "openapi": "3.0.3",
            "paths": {
                "/repos": {"get": {"tags": ["Repository"], "operationId": "listRepos"}}
            }
        });

        let filtered = document.filter_tags(&TagFilter::new(["Repository"]));

        assert!(
            filtered
                .pointer("/paths/~1repos/get")
                .is_some_and(Value::is_object)
        );
    }

    #[test]
    fn should_render_a_minimal_document_when_nothing_matches() {
        let document = json!({
            "openapi": "3.0.3",
            "info": {"title": "Empty", "version": "0"},
            "paths": {"/internal": {"get": {"tags": ["Internal"], "operationId": "hidden"}}},
            "tags": [{"name": "Internal"}],
            "components": {"schemas": {"Hidden": {"type": "object"}}}
        });

        let filtered = TagFilter::default().filter(&document);
        let pretty = serde_json::to_string_pretty(&filtered).expect("a serializable document");

        assert_snapshot!(pretty, @r#"
        {
          "openapi": "3.0.3",
          "info": {
            "title": "Empty",
            "version": "0"
          },
          "servers": [],
          "paths": {}
        }
        "#);
    }
}
