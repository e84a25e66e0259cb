//! The checking pipeline: resolve references, fetch their citers, and tally
//! which papers cite several of them.
//!
//! Phases run strictly in sequence. Resolution enriches every reference
//! before any citer fetching starts, and fetching finishes before the tally
//! is built. A query failure in any phase aborts the run; no partial results
//! are produced.

mod error;
mod progress;
mod tally;

pub use error::CheckError;
pub use progress::{ConsoleProgress, Progress, SilentProgress};
pub use tally::TallyTable;

pub use crate::parser::{CiterRecord, Reference};

use tracing::{debug, info, warn};

use crate::scholar::{CitationIndex, PAGE_SIZE};

/// Default citation-count ceiling: references cited at least this many times
/// are too widely cited to signal a meaningful overlap, so their citers are
/// not fetched.
pub const DEFAULT_RMAX: usize = 50;

/// Runs the resolve / fetch-citers / tally pipeline over a bibliography.
pub struct BibChecker {
    index: Box<dyn CitationIndex>,
    rmax: usize,
    progress: Box<dyn Progress>,
}

impl BibChecker {
    /// Creates a checker over the given citation index.
    #[must_use]
    pub fn new(index: Box<dyn CitationIndex>, rmax: usize, progress: Box<dyn Progress>) -> Self {
        Self {
            index,
            rmax,
            progress,
        }
    }

    /// Runs the full pipeline, enriching `references` in place and returning
    /// the citer tally.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::Query`] when any index query fails, and
    /// [`CheckError::AllLookupsFailed`] when no reference resolves to an
    /// identifier (the signature of the service blocking automated queries).
    pub async fn run(&mut self, references: &mut [Reference]) -> Result<TallyTable, CheckError> {
        self.resolve(references).await?;
        self.fetch_citers(references).await?;
        Ok(tally(references))
    }

    /// Resolves each reference by title search, recording the identifier and
    /// citation count of the first hit.
    ///
    /// A reference whose search returns nothing, or whose first hit carries
    /// no identifier, stays unresolved. When every reference ends up
    /// unresolved the whole run fails, since that pattern means the service
    /// is answering with challenge pages rather than results.
    async fn resolve(&mut self, references: &mut [Reference]) -> Result<(), CheckError> {
        info!(count = references.len(), "resolving references by title");
        self.progress.begin("resolving", references.len());

        for (done, reference) in references.iter_mut().enumerate() {
            let hits = self.index.search(&reference.title).await?;
            match hits.first() {
                Some(hit) if hit.cluster_id.is_some() => {
                    debug!(
                        key = %reference.key,
                        cluster_id = ?hit.cluster_id,
                        num_citations = hit.num_citations,
                        "resolved reference"
                    );
                    reference.cluster_id.clone_from(&hit.cluster_id);
                    reference.num_citations = Some(hit.num_citations);
                }
                _ => {
                    warn!(key = %reference.key, "reference did not resolve");
                }
            }
            self.progress.update(done + 1);
        }
        self.progress.finish();

        if references.iter().all(|r| r.cluster_id.is_none()) {
            return Err(CheckError::AllLookupsFailed);
        }
        Ok(())
    }

    /// Fetches the citing papers for every resolved reference whose citation
    /// count is below the ceiling.
    ///
    /// Pages through cited-by results in steps of [`PAGE_SIZE`]. References
    /// that are unresolved or at/above the ceiling are left untouched, so
    /// their `cited_by` stays `None` (never attempted) rather than empty.
    async fn fetch_citers(&mut self, references: &mut [Reference]) -> Result<(), CheckError> {
        self.progress.begin("fetching citers", references.len());

        for (done, reference) in references.iter_mut().enumerate() {
            let selected = match (&reference.cluster_id, reference.num_citations) {
                (Some(id), Some(count)) if count < self.rmax => Some((id.clone(), count)),
                (Some(_), Some(count)) => {
                    debug!(
                        key = %reference.key,
                        num_citations = count,
                        rmax = self.rmax,
                        "skipping widely cited reference"
                    );
                    None
                }
                _ => None,
            };

            if let Some((cluster_id, count)) = selected {
                let mut citers = Vec::new();
                let mut start = 0;
                while start < count {
                    let hits = self.index.cited_by(&cluster_id, start).await?;
                    citers.extend(
                        hits.into_iter()
                            .map(|hit| CiterRecord::new(hit.cluster_id, hit.title)),
                    );
                    start += PAGE_SIZE;
                }
                debug!(key = %reference.key, citers = citers.len(), "fetched citers");
                reference.cited_by = Some(citers);
            }
            self.progress.update(done + 1);
        }
        self.progress.finish();
        Ok(())
    }
}

impl std::fmt::Debug for BibChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BibChecker")
            .field("rmax", &self.rmax)
            .finish_non_exhaustive()
    }
}

/// Counts, across all references, how often each citing paper appears.
#[must_use]
pub fn tally(references: &[Reference]) -> TallyTable {
    let mut table = TallyTable::new();
    for reference in references {
        if let Some(citers) = &reference.cited_by {
            for citer in citers {
                table.insert(citer.clone());
            }
        }
    }
    table
}
