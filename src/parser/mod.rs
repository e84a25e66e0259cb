//! Bibliography loading: BibTeX file into an ordered sequence of references.
//!
//! The loader is the first pipeline pass. It reads the file, segments entries,
//! and produces one [`Reference`] per titled entry in file order. Entries
//! without a title (or malformed beyond recovery) are skipped with a warning;
//! a file that yields zero usable entries is a fatal error.

mod bibtex;
mod error;
mod reference;

pub use bibtex::{BibtexEntry, BibtexParseResult, parse_bibtex_entries};
pub use error::ParseError;
pub use reference::{CiterRecord, Reference};

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

/// Loads a BibTeX bibliography file into an ordered sequence of references.
///
/// # Errors
///
/// Returns [`ParseError::Unreadable`] when the file cannot be read, or
/// [`ParseError::NoEntries`] when it contains no usable (titled) entries.
pub fn load_bibliography(path: &Path) -> Result<Vec<Reference>, ParseError> {
    let content = fs::read_to_string(path).map_err(|source| ParseError::Unreadable {
        path: path.display().to_string(),
        source,
    })?;

    let parsed = parse_bibtex_entries(&content);
    for message in &parsed.skipped {
        warn!(%message, "skipping bibliography entry");
    }

    let mut untitled = 0usize;
    let mut references = Vec::with_capacity(parsed.entries.len());
    for entry in parsed.entries {
        match entry.title {
            Some(title) => {
                debug!(key = %entry.key, %title, "loaded reference");
                references.push(Reference::new(entry.key, title));
            }
            None => {
                warn!(key = %entry.key, "entry has no title; skipping");
                untitled += 1;
            }
        }
    }

    if references.is_empty() {
        return Err(ParseError::NoEntries {
            path: path.display().to_string(),
            skipped: parsed.skipped.len() + untitled,
        });
    }

    Ok(references)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp_bib(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_bibliography_returns_references_in_file_order() {
        let file = write_temp_bib(
            r#"
@article{a, title={Alpha}, year={2020}}
@article{b, title={Beta}, year={2021}}
"#,
        );
        let references = load_bibliography(file.path()).unwrap();
        assert_eq!(references.len(), 2);
        assert_eq!(references[0].title, "Alpha");
        assert_eq!(references[1].title, "Beta");
        assert!(references.iter().all(|r| r.cluster_id.is_none()));
    }

    #[test]
    fn test_load_bibliography_skips_untitled_entries() {
        let file = write_temp_bib(
            r#"
@article{a, title={Alpha}, year={2020}}
@article{b, author={Nobody}, year={2021}}
"#,
        );
        let references = load_bibliography(file.path()).unwrap();
        assert_eq!(references.len(), 1);
        assert_eq!(references[0].key, "a");
    }

    #[test]
    fn test_load_bibliography_missing_file_is_fatal() {
        let result = load_bibliography(Path::new("/nonexistent/refs.bib"));
        assert!(matches!(result, Err(ParseError::Unreadable { .. })));
    }

    #[test]
    fn test_load_bibliography_no_usable_entries_is_fatal() {
        let file = write_temp_bib("@article{a, author={Nobody}, year={2021}}");
        let result = load_bibliography(file.path());
        assert!(matches!(result, Err(ParseError::NoEntries { .. })));
    }

    #[test]
    fn test_load_bibliography_empty_file_is_fatal() {
        let file = write_temp_bib("");
        let result = load_bibliography(file.path());
        assert!(matches!(result, Err(ParseError::NoEntries { .. })));
    }
}
