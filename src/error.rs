//! Error types for the scraping pipeline.
//!
//! Every stage failure surfaces as one of these variants; nothing is
//! retried inside the pipeline and nothing is silently swallowed.

/// Error type for pipeline operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input string is not a valid absolute HTTP(S) URL.
    ///
    /// Raised before any network access is attempted.
    #[error("invalid URL: {0}")]
    MalformedUrl(String),

    /// Network failure or non-success HTTP status while fetching the page.
    ///
    /// `status` is `None` when the request failed before a response was
    /// received (DNS, connect, TLS), and carries the HTTP status otherwise.
    #[error("fetch failed: {message}")]
    Fetch {
        /// HTTP status code, if a response was received.
        status: Option<u16>,
        /// Human-readable failure description, including the URL.
        message: String,
    },

    /// No extractable article body was found in the document.
    #[error("no extractable article content found")]
    NoContent,

    /// General extraction failure.
    #[error("extraction failed: {0}")]
    Extraction(String),

    /// Internal setup failure before any pipeline stage ran, e.g. the
    /// HTTP client could not be constructed.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;
