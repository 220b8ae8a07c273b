//! Operation identifier sanitization and collision resolution.
//!
//! Identifiers are unique within their *primary-tag* scope: the first entry
//! of an operation's `tags` array. Two operations only collide when they
//! share that first tag, so `["A", "B"]` and `["B", "A"]` live in different
//! scopes even though they overlap.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use regex::Regex;
use tracing::error;

/// Substitute for identifiers that sanitize down to nothing.
pub const FALLBACK_OPERATION_ID: &str = "defaultOperationId";

/// Upstream identifiers replaced verbatim before any sanitization.
const LITERAL_RENAMES: &[(&str, &str)] = &[("streamRaw", "streamFileContentRaw")];

/// Suffix attempts before giving up on a colliding identifier.
const MAX_RENAME_ATTEMPTS: usize = 20;

static INVALID_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]").expect("a valid regex"));
static UNDERSCORE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_{2,}").expect("a valid regex"));

/// Normalizes a raw operation identifier to `[A-Za-z0-9_]`.
///
/// Whitespace is trimmed, every other character is replaced with `_`,
/// leading and trailing underscore runs are stripped, and internal runs are
/// collapsed to a single `_`. An identifier that sanitizes to nothing
/// becomes [`FALLBACK_OPERATION_ID`]. Sanitizing an already-clean
/// identifier is a no-op, so the function is idempotent.
pub fn sanitize_operation_id(raw: &str) -> String {
    let replaced = INVALID_CHARS.replace_all(raw.trim(), "_");
    let collapsed = UNDERSCORE_RUNS.replace_all(&replaced, "_");
    let stripped = collapsed.trim_matches('_');
    if stripped.is_empty() {
        FALLBACK_OPERATION_ID.to_string()
    } else {
        stripped.to_string()
    }
}

/// Identifiers already assigned during one filtering run, keyed by primary
/// tag.
///
/// The registry is a plain value created per run and discarded with it; no
/// state survives between runs.
#[derive(Debug, Default)]
pub struct OperationIdRegistry {
    assigned: BTreeMap<String, BTreeSet<String>>,
}

impl OperationIdRegistry {
    /// Chooses the identifier to emit for an operation, given its primary
    /// tag and the raw identifier read from the document.
    ///
    /// The raw identifier goes through the literal rename table, then
    /// sanitization, then collision resolution: suffixes `_1`, `_2`, … are
    /// tried (re-sanitized) until a free identifier is found. When all 20
    /// suffixes are taken the *original* raw identifier is kept and the
    /// condition is logged as an error. The chosen identifier is recorded
    /// before returning.
    pub fn resolve(&mut self, primary_tag: &str, raw_id: &str) -> String {
        let renamed = LITERAL_RENAMES
            .iter()
            .find(|(from, _)| *from == raw_id)
            .map_or(raw_id, |(_, to)| *to);

        let mut candidate = sanitize_operation_id(renamed);
        let seen = self.assigned.entry(primary_tag.to_string()).or_default();

        if seen.contains(&candidate) {
            let base = candidate;
            let free = (1..=MAX_RENAME_ATTEMPTS)
                .map(|attempt| sanitize_operation_id(&format!("{base}_{attempt}")))
                .find(|suffixed| !seen.contains(suffixed));
            candidate = match free {
                Some(suffixed) => suffixed,
                None => {
                    error!(%raw_id, %primary_tag, "no free operationId found, keeping the original");
                    raw_id.to_string()
                }
            };
        }

        seen.insert(candidate.clone());
        candidate
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::already_clean("getRepository", "getRepository")]
    #[case::whitespace("  listPullRequests  ", "listPullRequests")]
    #[case::punctuation("get-repo/by id", "get_repo_by_id")]
    #[case::underscore_runs("__get___repo__", "get_repo")]
    #[case::empty("", "defaultOperationId")]
    #[case::only_invalid("-- --", "defaultOperationId")]
    fn should_sanitize_operation_id(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(sanitize_operation_id(raw), expected);
    }

    #[test]
    fn should_sanitize_deterministically() {
        let first = sanitize_operation_id("get repo!");
        let second = sanitize_operation_id("get repo!");

        assert_eq!(first, second);
        assert_eq!(sanitize_operation_id(&first), first);
    }

    #[test]
    fn should_apply_literal_rename() {
        let mut registry = OperationIdRegistry::default();

        assert_eq!(
            registry.resolve("Repository", "streamRaw"),
            "streamFileContentRaw"
        );
    }

    #[test]
    fn should_suffix_colliding_identifiers() {
        let mut registry = OperationIdRegistry::default();

        assert_eq!(registry.resolve("Repository", "list"), "list");
        assert_eq!(registry.resolve("Repository", "list"), "list_1");
        assert_eq!(registry.resolve("Repository", "list"), "list_2");
    }

    #[test]
    fn should_scope_collisions_by_primary_tag() {
        let mut registry = OperationIdRegistry::default();

        assert_eq!(registry.resolve("Repository", "list"), "list");
        assert_eq!(registry.resolve("Project", "list"), "list");
    }

    #[test]
    fn should_keep_original_after_exhausting_suffixes() {
        let mut registry = OperationIdRegistry::default();

        registry.resolve("Repository", "op");
        for _ in 0..MAX_RENAME_ATTEMPTS {
            registry.resolve("Repository", "op");
        }

        // All of op, op_1 .. op_20 are taken at this point.
        assert_eq!(registry.resolve("Repository", "op"), "op");
    }
}
