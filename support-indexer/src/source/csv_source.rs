//! CSV batch file source.
//!
//! Batch files live directly inside the source directory; subdirectories are
//! not searched.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::errors::IngestError;

/// Extension of batch files, compared case-insensitively.
pub const BATCH_FILE_EXTENSION: &str = "csv";

/// A parsed row: column name to raw cell value.
///
/// A column absent from the file is absent from the map; an empty cell maps to
/// an empty string.
pub type RawRow = HashMap<String, String>;

/// List the batch files in `dir`, sorted by file name.
///
/// # Returns
///
/// * `Ok(Vec<PathBuf>)` - The batch files found (possibly none)
/// * `Err(IngestError::DiscoveryError)` - If `dir` is not a readable directory
pub fn discover_batch_files(dir: &Path) -> Result<Vec<PathBuf>, IngestError> {
    if !dir.is_dir() {
        return Err(IngestError::discovery(format!(
            "{} is not a directory",
            dir.display()
        )));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "Skipping unreadable directory entry");
                continue;
            }
        };

        if entry.file_type().is_file() && has_batch_extension(entry.path()) {
            files.push(entry.into_path());
        }
    }

    debug!(dir = %dir.display(), file_count = files.len(), "Discovered batch files");
    Ok(files)
}

fn has_batch_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(BATCH_FILE_EXTENSION))
}

/// Parse a batch file into rows, in file order.
///
/// The first line is the header. Header names are trimmed; cell values are
/// kept verbatim. A record whose field count differs from the header fails the
/// whole file.
pub fn read_rows(path: &Path) -> Result<Vec<RawRow>, IngestError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::Headers)
        .from_path(path)
        .map_err(|e| IngestError::file_parse(format!("{}: {}", path.display(), e)))?;

    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(column, value)| (column.to_string(), value.to_string()))
            .collect();
        rows.push(row);
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_discover_only_csv_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.csv"), "title\n").unwrap();
        fs::write(dir.path().join("a.CSV"), "title\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        fs::create_dir(dir.path().join("nested.csv")).unwrap();
        fs::write(dir.path().join("nested.csv").join("deep.csv"), "title\n").unwrap();

        let files = discover_batch_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();

        assert_eq!(names, vec!["a.CSV", "b.csv"]);
    }

    #[test]
    fn test_discover_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let result = discover_batch_files(&dir.path().join("missing"));
        assert!(matches!(result, Err(IngestError::DiscoveryError(_))));
    }

    #[test]
    fn test_read_rows_maps_headers_to_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tickets.csv");
        fs::write(
            &path,
            "title, customer_email ,priority\n\"Login, again\",a@x.com,\nPrinter,b@x.com,1\n",
        )
        .unwrap();

        let rows = read_rows(&path).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["title"], "Login, again");
        assert_eq!(rows[0]["customer_email"], "a@x.com");
        assert_eq!(rows[0]["priority"], "");
        assert_eq!(rows[1]["priority"], "1");
        assert!(!rows[0].contains_key("category"));
    }

    #[test]
    fn test_read_rows_rejects_ragged_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.csv");
        fs::write(&path, "title,status\nA,open\nB,open,extra\n").unwrap();

        let result = read_rows(&path);
        assert!(matches!(result, Err(IngestError::FileParseError(_))));
    }

    #[test]
    fn test_read_rows_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_rows(&dir.path().join("gone.csv"));
        assert!(matches!(result, Err(IngestError::FileParseError(_))));
    }
}
