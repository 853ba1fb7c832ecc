//! Support case document types for the search index.
//!
//! This module defines the document structure that is indexed in the search engine.

use serde::{Deserialize, Serialize};

/// Priority assigned to a ticket whose source row carries none.
pub const DEFAULT_PRIORITY: i32 = 3;

/// Category assigned to a ticket whose source row carries none.
pub const DEFAULT_CATEGORY: &str = "general";

/// Document representation for the search index.
///
/// This struct represents a support ticket as it is stored in the search engine.
/// The `customer_email` doubles as the document id, so re-ingesting a ticket for
/// the same customer replaces the previous document.
///
/// # Fields
///
/// - `title`, `description`, `tags`: full-text searchable
/// - `customer_email`: exact-match customer identifier, also the document id
/// - `ticket_id`: exact-match business identifier
/// - `created_date`: raw date string, parsed by the store's `date` field type
/// - `status`: exact-match, the only field mutated after ingestion
/// - `priority`: defaults to [`DEFAULT_PRIORITY`]
/// - `category`: defaults to [`DEFAULT_CATEGORY`]
/// - `resolution_time`, `agent_notes`: populated outside ingestion, start at `0` and `""`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SupportCaseDocument {
    pub title: String,
    pub description: String,
    pub customer_email: String,
    pub tags: String,
    pub ticket_id: String,
    pub created_date: String,
    pub status: String,
    pub priority: i32,
    pub category: String,
    pub resolution_time: i64,
    pub agent_notes: String,
}

impl SupportCaseDocument {
    /// Create a new document with default `priority` and `category`.
    ///
    /// `resolution_time` and `agent_notes` always start empty; ingestion never
    /// fills them.
    ///
    /// # Example
    ///
    /// ```
    /// use support_indexer_shared::SupportCaseDocument;
    ///
    /// let doc = SupportCaseDocument::new(
    ///     "Cannot log in",
    ///     "Password reset link expired",
    ///     "a@x.com",
    ///     "login,auth",
    ///     "T-100",
    ///     "2024-01-15",
    ///     "open",
    /// );
    /// assert_eq!(doc.priority, 3);
    /// ```
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        customer_email: impl Into<String>,
        tags: impl Into<String>,
        ticket_id: impl Into<String>,
        created_date: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            customer_email: customer_email.into(),
            tags: tags.into(),
            ticket_id: ticket_id.into(),
            created_date: created_date.into(),
            status: status.into(),
            priority: DEFAULT_PRIORITY,
            category: DEFAULT_CATEGORY.to_string(),
            resolution_time: 0,
            agent_notes: String::new(),
        }
    }

    /// Override the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Override the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// The document ID used in the search index.
    ///
    /// Tickets are keyed by customer email, so the last ingested ticket for a
    /// customer wins.
    pub fn document_id(&self) -> &str {
        &self.customer_email
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SupportCaseDocument {
        SupportCaseDocument::new(
            "Printer jam",
            "Paper stuck in tray 2",
            "ops@example.com",
            "hardware,printer",
            "T-42",
            "2024-03-01T10:00:00Z",
            "open",
        )
    }

    #[test]
    fn test_new_applies_defaults() {
        let doc = sample();

        assert_eq!(doc.priority, DEFAULT_PRIORITY);
        assert_eq!(doc.category, DEFAULT_CATEGORY);
        assert_eq!(doc.resolution_time, 0);
        assert!(doc.agent_notes.is_empty());
    }

    #[test]
    fn test_builders_override_defaults() {
        let doc = sample().with_priority(1).with_category("billing");

        assert_eq!(doc.priority, 1);
        assert_eq!(doc.category, "billing");
    }

    #[test]
    fn test_document_id_is_customer_email() {
        assert_eq!(sample().document_id(), "ops@example.com");
    }

    #[test]
    fn test_serialization_field_names() {
        let json = serde_json::to_value(sample()).unwrap();

        assert_eq!(json["customer_email"], "ops@example.com");
        assert_eq!(json["priority"], 3);
        assert_eq!(json["resolution_time"], 0);
        assert_eq!(json["agent_notes"], "");
        assert_eq!(json.as_object().unwrap().len(), 11);
    }
}
