//! Bibcheck Core Library
//!
//! This library cross-references the bibliography of a research paper against
//! a citation-indexing web service to surface papers that cite multiple of the
//! same source references.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`parser`] - BibTeX bibliography loading
//! - [`scholar`] - Citation-index query client (title search, cited-by pagination)
//! - [`auth`] - Cookie file parsing for authenticated/less-throttled queries
//! - [`check`] - The resolve / fetch-citers / tally pipeline
//! - [`report`] - Plain-text result rendering (stdout or file)
//!
//! The pipeline is strictly sequential: all references are resolved before any
//! citer fetching begins, and all fetching completes before aggregation.

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod auth;
pub mod check;
pub mod parser;
pub mod report;
pub mod scholar;
mod user_agent;

// Re-export commonly used types
pub use auth::{CookieError, load_cookie_jar};
pub use check::{
    BibChecker, CheckError, CiterRecord, ConsoleProgress, DEFAULT_RMAX, Progress, Reference,
    SilentProgress, TallyTable,
};
pub use parser::{ParseError, load_bibliography};
pub use scholar::{CitationIndex, PAGE_SIZE, QueryError, ScholarClient, SearchHit};
