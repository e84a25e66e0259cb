//! Citation-index query client.
//!
//! This module talks to a Google-Scholar-style citation index over HTTP and
//! parses its result pages. Two query shapes are supported: full-text title
//! search, and "who cites cluster X" with a pagination start offset.
//!
//! [`CitationIndex`] is the seam the pipeline depends on; [`ScholarClient`]
//! is the `reqwest`-backed implementation. Tests substitute their own
//! implementations or point the client at a mock server via
//! [`ScholarClient::with_base_url`].

mod client;
mod error;
mod html;

pub use client::ScholarClient;
pub use error::QueryError;
pub use html::parse_results;

use async_trait::async_trait;

/// Fixed page size of the citation index: one query returns at most this
/// many results, so cited-by fetching pages with start offsets 0, 20, 40, ...
pub const PAGE_SIZE: usize = 20;

/// One result record from the citation index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    /// Opaque identifier the index assigns to this publication, when exposed.
    pub cluster_id: Option<String>,
    /// Result title with markup stripped.
    pub title: String,
    /// Number of papers citing this result (0 when the page shows none).
    pub num_citations: usize,
}

/// Query operations the pipeline needs from a citation index.
///
/// Kept object-safe so the pipeline owns a `Box<dyn CitationIndex>` and tests
/// can inject stubs.
#[async_trait]
pub trait CitationIndex: Send + Sync {
    /// Full-text search; returns up to one page of hits, best match first.
    async fn search(&self, words: &str) -> Result<Vec<SearchHit>, QueryError>;

    /// Papers citing `cluster_id`, starting at result offset `start`.
    async fn cited_by(&self, cluster_id: &str, start: usize)
    -> Result<Vec<SearchHit>, QueryError>;
}
