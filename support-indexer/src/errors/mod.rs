//! Error types for the support indexer ingest.

use thiserror::Error;

/// Errors that can occur while loading batch files.
///
/// None of these abort the load pass: they are caught at file granularity and
/// recorded in the load summary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IngestError {
    /// The source directory could not be listed.
    #[error("Discovery error: {0}")]
    DiscoveryError(String),

    /// A batch file could not be read or parsed.
    #[error("File parse error: {0}")]
    FileParseError(String),

    /// A row could not be turned into a document.
    #[error("Row transform error: {0}")]
    RowTransformError(String),

    /// Error from the loader component (store writes).
    #[error("Loader error: {0}")]
    LoaderError(String),
}

impl IngestError {
    /// Create a discovery error.
    pub fn discovery(msg: impl Into<String>) -> Self {
        Self::DiscoveryError(msg.into())
    }

    /// Create a file parse error.
    pub fn file_parse(msg: impl Into<String>) -> Self {
        Self::FileParseError(msg.into())
    }

    /// Create a row transform error.
    pub fn row_transform(msg: impl Into<String>) -> Self {
        Self::RowTransformError(msg.into())
    }

    /// Create a loader error.
    pub fn loader(msg: impl Into<String>) -> Self {
        Self::LoaderError(msg.into())
    }
}

impl From<csv::Error> for IngestError {
    fn from(err: csv::Error) -> Self {
        Self::FileParseError(err.to_string())
    }
}
