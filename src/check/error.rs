//! Error types for the checking pipeline.

use thiserror::Error;

use crate::scholar::QueryError;

/// Errors that can occur while running the checking pipeline.
#[derive(Debug, Error)]
pub enum CheckError {
    /// A citation-index query failed.
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Every reference resolved to no identifier, which indicates the service
    /// is blocking automated queries rather than a bibliography problem.
    #[error(
        "no references could be resolved; the citation index is likely \
         blocking automated queries (try supplying a cookie file with -c)"
    )]
    AllLookupsFailed,
}
