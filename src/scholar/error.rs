//! Error types for citation-index queries.

use thiserror::Error;

/// Errors that can occur while querying the citation index.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The HTTP client could not be constructed.
    #[error("failed to construct HTTP client: {reason}")]
    ClientBuild {
        /// Description of the construction failure.
        reason: String,
    },

    /// The request could not be sent or the response body could not be read.
    #[error("citation index request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The index answered with a non-success HTTP status.
    #[error("citation index returned HTTP {status}")]
    Status {
        /// The HTTP status code received.
        status: u16,
    },
}
