//! Record processor implementation.
//!
//! Transforms raw rows into SupportCaseDocument structures for indexing.

use tracing::instrument;

use crate::errors::IngestError;
use crate::source::RawRow;
use support_indexer_shared::{SupportCaseDocument, DEFAULT_CATEGORY, DEFAULT_PRIORITY};

/// Columns every row must carry with a non-empty value.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "title",
    "description",
    "customer_email",
    "tags",
    "ticket_id",
    "created_date",
    "status",
];

/// Processor that transforms raw rows into search documents.
///
/// The processor is responsible for:
/// - Checking that required columns are present
/// - Applying defaults for `priority` and `category`
/// - Leaving `resolution_time` and `agent_notes` at their initial values, even
///   if the row carries them
///
/// Values are copied verbatim; `created_date` is parsed by the store.
pub struct RecordProcessor {}

impl RecordProcessor {
    /// Create a new record processor.
    pub fn new() -> Self {
        Self {}
    }

    /// Transform a row into a document.
    ///
    /// # Returns
    ///
    /// * `Ok(SupportCaseDocument)` - The document to index
    /// * `Err(IngestError::RowTransformError)` - If a required column is missing or
    ///   empty, or `priority` is not a number in integer range
    #[instrument(skip(self, row), level = "trace")]
    pub fn to_document(&self, row: &RawRow) -> Result<SupportCaseDocument, IngestError> {
        let required = |column: &str| {
            Self::value(row, column).ok_or_else(|| {
                IngestError::row_transform(format!("missing required field '{}'", column))
            })
        };

        let doc = SupportCaseDocument::new(
            required("title")?,
            required("description")?,
            required("customer_email")?,
            required("tags")?,
            required("ticket_id")?,
            required("created_date")?,
            required("status")?,
        );

        let priority = match Self::value(row, "priority") {
            Some(raw) => Self::parse_priority(raw)?,
            None => DEFAULT_PRIORITY,
        };
        let category = Self::value(row, "category").unwrap_or(DEFAULT_CATEGORY);

        Ok(doc.with_priority(priority).with_category(category))
    }

    /// A cell's value, treating a missing column or a blank cell as null.
    fn value<'a>(row: &'a RawRow, column: &str) -> Option<&'a str> {
        row.get(column)
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
    }

    /// Parse a priority cell.
    ///
    /// Decimals are truncated toward zero (`2.5` becomes `2`), matching how the
    /// index's integer field coerces numeric strings. Non-numeric or out of range
    /// values are rejected.
    fn parse_priority(raw: &str) -> Result<i32, IngestError> {
        let trimmed = raw.trim();
        if let Ok(priority) = trimmed.parse::<i32>() {
            return Ok(priority);
        }

        match trimmed.parse::<f64>() {
            Ok(value)
                if value.is_finite()
                    && value.trunc() >= f64::from(i32::MIN)
                    && value.trunc() <= f64::from(i32::MAX) =>
            {
                Ok(value.trunc() as i32)
            }
            _ => Err(IngestError::row_transform(format!(
                "priority '{}' is not a number",
                raw
            ))),
        }
    }
}

impl Default for RecordProcessor {
    fn default() -> Self {
        Self::new()
    }
}
