//! Loader module for the support indexer ingest.
//!
//! Loads every batch file of a source directory into the search index, one
//! row and one file at a time.

mod summary;

pub use summary::{FileOutcome, FileReport, LoadSummary};

use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

use crate::errors::IngestError;
use crate::processor::RecordProcessor;
use crate::source::{self, RawRow};
use support_indexer_repository::SearchIndexProvider;

/// What to do with a row that cannot be transformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowErrorPolicy {
    /// Abandon the rest of the file.
    #[default]
    AbortFile,
    /// Log the row, skip it and continue with the file.
    SkipRow,
}

impl RowErrorPolicy {
    /// Parse a policy name.
    ///
    /// Valid values: "abort-file" or "skip-row" (case-insensitive, `_` accepted).
    /// Defaults to "abort-file" if not set or invalid.
    pub fn from_value(value: Option<&str>) -> Self {
        match value.map(|v| v.to_lowercase().replace('_', "-")).as_deref() {
            None | Some("abort-file") => Self::AbortFile,
            Some("skip-row") => Self::SkipRow,
            Some(other) => {
                warn!(value = %other, "Invalid row error policy, defaulting to 'abort-file'");
                Self::AbortFile
            }
        }
    }
}

/// Configuration for the batch loader.
#[derive(Debug, Clone, Default)]
pub struct LoaderConfig {
    pub row_error_policy: RowErrorPolicy,
}

/// Loader that indexes batch files into the search engine.
///
/// The loader is responsible for:
/// - Discovering batch files in the source directory
/// - Converting rows to documents through the `RecordProcessor`
/// - Writing each document under its customer email, one call per document
/// - Isolating failures so one bad file never stops the others
pub struct BatchLoader {
    provider: Arc<dyn SearchIndexProvider>,
    processor: RecordProcessor,
    config: LoaderConfig,
}

impl BatchLoader {
    /// Create a new batch loader with the given provider.
    pub fn new(provider: Arc<dyn SearchIndexProvider>) -> Self {
        Self {
            provider,
            processor: RecordProcessor::new(),
            config: LoaderConfig::default(),
        }
    }

    /// Create a new batch loader with custom configuration.
    pub fn with_config(provider: Arc<dyn SearchIndexProvider>, config: LoaderConfig) -> Self {
        Self {
            provider,
            processor: RecordProcessor::new(),
            config,
        }
    }

    /// Load every batch file in `source_dir`.
    ///
    /// Failures are logged and recorded per file; they never abort the pass.
    /// An unreadable source directory yields an empty summary.
    #[instrument(skip(self), fields(source_dir = %source_dir.display()))]
    pub async fn load_all(&self, source_dir: &Path) -> LoadSummary {
        let mut summary = LoadSummary::default();

        let files = match source::discover_batch_files(source_dir) {
            Ok(files) => files,
            Err(e) => {
                warn!(error = %e, "No batch files loaded");
                return summary;
            }
        };

        info!(file_count = files.len(), "Found batch files to process");

        for path in files {
            info!(file = %path.display(), "Processing batch file");
            let outcome = self.load_file(&path).await;

            match &outcome {
                FileOutcome::Loaded { indexed, skipped } => {
                    info!(
                        file = %path.display(),
                        indexed = indexed,
                        skipped = skipped,
                        "Indexed documents from batch file"
                    );
                }
                FileOutcome::Failed {
                    error,
                    indexed_before_failure,
                } => {
                    error!(
                        file = %path.display(),
                        error = %error,
                        indexed_before_failure = indexed_before_failure,
                        "Error processing batch file"
                    );
                }
            }

            summary.push(path, outcome);
        }

        info!(
            files = summary.files.len(),
            loaded_files = summary.loaded_files().count(),
            failed_files = summary.failed_files().count(),
            total_indexed = summary.total_indexed(),
            "Batch load complete"
        );
        summary
    }

    /// Load a single batch file.
    pub async fn load_file(&self, path: &Path) -> FileOutcome {
        let rows = match source::read_rows(path) {
            Ok(rows) => rows,
            Err(error) => {
                return FileOutcome::Failed {
                    error,
                    indexed_before_failure: 0,
                }
            }
        };

        let mut indexed = 0;
        let mut skipped = 0;

        for (index, row) in rows.iter().enumerate() {
            // Line 1 is the header.
            let line = index + 2;

            match self.load_row(row).await {
                Ok(()) => indexed += 1,
                Err(IngestError::RowTransformError(msg))
                    if self.config.row_error_policy == RowErrorPolicy::SkipRow =>
                {
                    warn!(file = %path.display(), line = line, error = %msg, "Skipping malformed row");
                    skipped += 1;
                }
                Err(error) => {
                    return FileOutcome::Failed {
                        error: Self::at_line(error, line),
                        indexed_before_failure: indexed,
                    }
                }
            }
        }

        FileOutcome::Loaded { indexed, skipped }
    }

    /// Transform and upsert one row.
    async fn load_row(&self, row: &RawRow) -> Result<(), IngestError> {
        let document = self.processor.to_document(row)?;

        self.provider
            .index_document(&document)
            .await
            .map_err(|e| {
                IngestError::loader(format!(
                    "Failed to index document {}: {}",
                    document.document_id(),
                    e
                ))
            })?;

        debug!(doc_id = %document.document_id(), "Row indexed");
        Ok(())
    }

    fn at_line(error: IngestError, line: usize) -> IngestError {
        match error {
            IngestError::RowTransformError(msg) => {
                IngestError::row_transform(format!("line {}: {}", line, msg))
            }
            IngestError::LoaderError(msg) => IngestError::loader(format!("line {}: {}", line, msg)),
            other => other,
        }
    }
}
