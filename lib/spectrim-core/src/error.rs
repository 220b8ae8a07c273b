//! Error types for document input and output.

/// Errors that can occur while loading or writing a specification document.
///
/// These cover the fatal conditions of a run: an unreachable or unreadable
/// source, and payloads that are not valid JSON. The filtering pass itself
/// is total over arbitrary JSON trees and produces no errors; structural
/// anomalies inside a document are logged and handled with defined
/// fallbacks instead.
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum SourceError {
    /// Filesystem error while reading or writing a document.
    IoError(std::io::Error),

    /// The payload is not valid JSON, or the result could not be
    /// serialized.
    JsonError(serde_json::Error),

    /// HTTP failure while fetching a remote document.
    ///
    /// Covers connection errors as well as non-success status codes.
    HttpError(reqwest::Error),

    /// The source looked like a URL but did not parse as one.
    UrlError(url::ParseError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_be_send_and_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<SourceError>();
        assert_sync::<SourceError>();
    }
}
