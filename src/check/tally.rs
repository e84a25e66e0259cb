//! Aggregation of citer occurrences across references.

use std::collections::HashMap;

use crate::parser::CiterRecord;

/// Counts how many of the bibliography's references each citing paper cites.
///
/// Iteration order follows first insertion, so results come out in the order
/// citers were first encountered. [`sorted_by_count_desc`] gives the
/// count-ordered view used when saving to a file.
///
/// [`sorted_by_count_desc`]: TallyTable::sorted_by_count_desc
#[derive(Debug, Default)]
pub struct TallyTable {
    entries: Vec<(CiterRecord, usize)>,
    index: HashMap<CiterRecord, usize>,
}

impl TallyTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one occurrence of the given citer.
    pub fn insert(&mut self, record: CiterRecord) {
        if let Some(&pos) = self.index.get(&record) {
            self.entries[pos].1 += 1;
        } else {
            self.index.insert(record.clone(), self.entries.len());
            self.entries.push((record, 1));
        }
    }

    /// Iterates entries in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&CiterRecord, usize)> {
        self.entries.iter().map(|(record, count)| (record, *count))
    }

    /// Returns entries sorted by descending count. Ties keep their
    /// first-insertion order.
    #[must_use]
    pub fn sorted_by_count_desc(&self) -> Vec<(&CiterRecord, usize)> {
        let mut sorted: Vec<(&CiterRecord, usize)> = self.iter().collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted
    }

    /// Number of distinct citers recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
