//! Plain-text rendering of tally results.
//!
//! Only citers shared by more than one reference are reported. The console
//! rendering lists them in the order they were first encountered; the file
//! rendering sorts by descending share count and uses TAB as the delimiter
//! so titles containing spaces stay machine-splittable.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::check::TallyTable;

/// Column width of the count field in console output; lines the titles up
/// under the header.
const COUNT_COLUMN_WIDTH: usize = 19;

/// Writes shared citers to `out` as an aligned two-column listing.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn print_results(tally: &TallyTable, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Citations shared   Title")?;
    for (record, count) in tally.iter() {
        if count > 1 {
            writeln!(out, "{count:<COUNT_COLUMN_WIDTH$}{}", record.title)?;
        }
    }
    Ok(())
}

/// Saves shared citers to `path`, one `count<TAB>title` line per citer,
/// most-shared first.
///
/// # Errors
///
/// Returns any error from creating or writing the file.
pub fn save_results(tally: &TallyTable, path: &Path) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    let mut written = 0;
    for (record, count) in tally.sorted_by_count_desc() {
        if count > 1 {
            writeln!(out, "{count}\t{}", record.title)?;
            written += 1;
        }
    }
    out.flush()?;
    info!(path = %path.display(), rows = written, "saved results");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::check::CiterRecord;

    fn citer(id: &str, title: &str) -> CiterRecord {
        CiterRecord::new(Some(id.to_string()), title)
    }

    fn sample_tally() -> TallyTable {
        let mut tally = TallyTable::new();
        // "Lone" appears once, "Shared" twice, "Popular" three times
        tally.insert(citer("1", "Lone"));
        tally.insert(citer("2", "Shared"));
        tally.insert(citer("3", "Popular"));
        tally.insert(citer("2", "Shared"));
        tally.insert(citer("3", "Popular"));
        tally.insert(citer("3", "Popular"));
        tally
    }

    #[test]
    fn test_print_results_header_and_alignment() {
        let mut out = Vec::new();
        print_results(&sample_tally(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Citations shared   Title");
        // Count field padded to 19 columns, so titles align with the header
        assert_eq!(lines[1], format!("{:<19}{}", 2, "Shared"));
        assert_eq!(lines[2], format!("{:<19}{}", 3, "Popular"));
    }

    #[test]
    fn test_print_results_excludes_single_occurrence_citers() {
        let mut out = Vec::new();
        print_results(&sample_tally(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(!text.contains("Lone"));
    }

    #[test]
    fn test_print_results_empty_tally_prints_only_header() {
        let mut out = Vec::new();
        print_results(&TallyTable::new(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "Citations shared   Title\n");
    }

    #[test]
    fn test_save_results_sorted_and_tab_delimited() {
        let file = tempfile::NamedTempFile::new().unwrap();
        save_results(&sample_tally(), file.path()).unwrap();

        let text = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(text, "3\tPopular\n2\tShared\n");
    }

    #[test]
    fn test_save_results_empty_tally_writes_empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        save_results(&TallyTable::new(), file.path()).unwrap();
        let text = std::fs::read_to_string(file.path()).unwrap();
        assert!(text.is_empty());
    }
}
