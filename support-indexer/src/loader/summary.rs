//! Per-file outcomes of a load pass.

use std::path::PathBuf;

use crate::errors::IngestError;

/// What happened to one batch file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Every row was indexed or, under the skip-row policy, skipped.
    Loaded { indexed: usize, skipped: usize },
    /// The file was abandoned. Rows written before the failure stay in the index.
    Failed {
        error: IngestError,
        indexed_before_failure: usize,
    },
}

impl FileOutcome {
    /// Documents written for this file, including those written before a failure.
    pub fn indexed(&self) -> usize {
        match self {
            Self::Loaded { indexed, .. } => *indexed,
            Self::Failed {
                indexed_before_failure,
                ..
            } => *indexed_before_failure,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Outcome of one batch file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    pub outcome: FileOutcome,
}

/// Summary of a load pass, one report per discovered file in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub files: Vec<FileReport>,
}

impl LoadSummary {
    pub fn push(&mut self, path: PathBuf, outcome: FileOutcome) {
        self.files.push(FileReport { path, outcome });
    }

    /// Total documents written across all files.
    pub fn total_indexed(&self) -> usize {
        self.files.iter().map(|f| f.outcome.indexed()).sum()
    }

    /// Total rows skipped under the skip-row policy.
    pub fn total_skipped(&self) -> usize {
        self.files
            .iter()
            .map(|f| match f.outcome {
                FileOutcome::Loaded { skipped, .. } => skipped,
                FileOutcome::Failed { .. } => 0,
            })
            .sum()
    }

    pub fn loaded_files(&self) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(|f| !f.outcome.is_failed())
    }

    pub fn failed_files(&self) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(|f| f.outcome.is_failed())
    }

    /// The report for the file with the given name, if it was processed.
    pub fn file(&self, file_name: &str) -> Option<&FileReport> {
        self.files
            .iter()
            .find(|f| f.path.file_name().is_some_and(|name| name == file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals() {
        let mut summary = LoadSummary::default();
        summary.push(
            PathBuf::from("/data/a.csv"),
            FileOutcome::Loaded {
                indexed: 3,
                skipped: 1,
            },
        );
        summary.push(
            PathBuf::from("/data/b.csv"),
            FileOutcome::Failed {
                error: IngestError::row_transform("missing required field 'title'"),
                indexed_before_failure: 2,
            },
        );

        assert_eq!(summary.total_indexed(), 5);
        assert_eq!(summary.total_skipped(), 1);
        assert_eq!(summary.loaded_files().count(), 1);
        assert_eq!(summary.failed_files().count(), 1);
        assert!(summary.file("b.csv").unwrap().outcome.is_failed());
        assert!(summary.file("c.csv").is_none());
    }
}
