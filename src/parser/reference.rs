//! Reference records produced by the loader and enriched by the pipeline.

/// One entry from the input bibliography.
///
/// Created by the loader with `title` populated from file content. The
/// resolver and citer fetcher mutate it in place; it is read-only afterward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Citation key after `@type{` (used for diagnostics only).
    pub key: String,
    /// Entry title, used as the lookup search text.
    pub title: String,
    /// Citation count reported by the index; `None` when unresolved.
    pub num_citations: Option<usize>,
    /// Opaque identifier the index assigns to this publication; `None` when unresolved.
    pub cluster_id: Option<String>,
    /// Papers citing this reference. `None` means fetching was never
    /// attempted; `Some(vec![])` means it was attempted and found none.
    pub cited_by: Option<Vec<CiterRecord>>,
}

impl Reference {
    /// Creates an unresolved reference with the given key and title.
    #[must_use]
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            num_citations: None,
            cluster_id: None,
            cited_by: None,
        }
    }
}

/// A paper that cites a [`Reference`], as an (identifier, title) pair.
///
/// Immutable once created; equality and hashing cover both fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CiterRecord {
    /// Index identifier of the citing paper, when the result page exposes one.
    pub cluster_id: Option<String>,
    /// Title of the citing paper.
    pub title: String,
}

impl CiterRecord {
    /// Creates a citer record.
    #[must_use]
    pub fn new(cluster_id: Option<String>, title: impl Into<String>) -> Self {
        Self {
            cluster_id,
            title: title.into(),
        }
    }
}
