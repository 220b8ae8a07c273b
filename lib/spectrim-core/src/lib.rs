//! # Spectrim Core
//!
//! Trim a large OpenAPI v3 document down to the subset of operations
//! carrying a chosen set of tags, with everything unreachable pruned away.
//!
//! The crate is built for one job in a build pipeline: take an upstream
//! specification that describes far more API surface than a client needs,
//! and produce a smaller document that still stands on its own — kept
//! operations, the schemas they transitively reference, the tag
//! definitions still in use, and the passthrough sections (`info`,
//! `servers`, security schemes) that give the subset meaning.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use spectrim_core::{SpecSource, TagFilter, write_pretty};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let source = SpecSource::parse("https://api.example.com/openapi.json")?;
//! let document = source.load().await?;
//!
//! let filtered = TagFilter::new(["Repository", "Project"]).filter(&document);
//!
//! write_pretty("subset.openapi.json".as_ref(), &filtered)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Design
//!
//! Documents are untyped [`serde_json::Value`] trees with object key order
//! preserved end to end; the filter never validates OpenAPI structure and
//! never fails on malformed shapes — anomalies degrade to logged fallbacks
//! (see [`filter`]). Loading and writing live at the edge in
//! [`SpecSource`] and [`write_pretty`], and those are the only fallible
//! parts of a run.

pub mod filter;

mod error;
mod source;

pub use error::SourceError;
pub use filter::{DEFAULT_TAGS, TagFilter, TagFilterExt};
pub use source::{SpecSource, write_pretty};
