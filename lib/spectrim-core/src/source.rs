//! Loading and writing specification documents.
//!
//! The filtering engine only ever sees an in-memory JSON tree; this module
//! is the boundary that produces and consumes those trees. Loading is
//! all-or-nothing: a source that cannot be reached or parsed aborts the run
//! before any filtering happens, so no partial output can be written.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info};
use url::Url;

use crate::error::SourceError;

/// Where a specification document comes from.
#[derive(Debug, Clone)]
pub enum SpecSource {
    /// A document on the local filesystem.
    Path(PathBuf),

    /// A document fetched over HTTP(S).
    Url(Url),
}

impl SpecSource {
    /// Interprets a raw argument as either a URL or a filesystem path.
    ///
    /// Anything starting with `http://` or `https://` must parse as a URL;
    /// everything else is taken as a path verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::UrlError`] when an `http(s)` argument is not
    /// a well-formed URL.
    pub fn parse(raw: &str) -> Result<Self, SourceError> {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            Ok(Self::Url(Url::parse(raw)?))
        } else {
            Ok(Self::Path(PathBuf::from(raw)))
        }
    }

    /// Loads the document into an untyped JSON tree.
    ///
    /// # Errors
    ///
    /// Fails when the source is unreachable, responds with a non-success
    /// status, or does not carry valid JSON.
    pub async fn load(&self) -> Result<Value, SourceError> {
        match self {
            Self::Path(path) => {
                debug!(path = %path.display(), "reading document");
                let data = std::fs::read_to_string(path)?;
                Ok(serde_json::from_str(&data)?)
            }
            Self::Url(url) => {
                debug!(%url, "fetching document");
                let response = reqwest::get(url.clone()).await?.error_for_status()?;
                Ok(response.json().await?)
            }
        }
    }
}

/// Writes a document as pretty-printed JSON with stable 2-space
/// indentation and a trailing newline.
///
/// # Errors
///
/// Fails when the document cannot be serialized or the file cannot be
/// written.
pub fn write_pretty(path: &Path, document: &Value) -> Result<(), SourceError> {
    let mut data = serde_json::to_string_pretty(document)?;
    data.push('\n');
    std::fs::write(path, data)?;
    info!(path = %path.display(), "document written");
    Ok(())
}
