//! Search result types for ticket search.
//!
//! This module defines the response structures returned from search operations.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A single ticket returned by a search.
///
/// Contains the ticket data along with its relevance score from the search engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TicketHit {
    /// The store document id (the customer email).
    pub id: String,
    pub title: String,
    pub description: String,
    pub customer_email: String,
    pub tags: String,
    pub status: String,
    pub created_date: String,
    pub priority: i32,
    pub category: String,

    /// Relevance score from the search engine.
    /// Higher scores indicate better matches.
    pub score: f64,

    /// Highlighted fragments keyed by field name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlights: Option<HashMap<String, Vec<String>>>,
}

/// Complete search response with results and metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TicketSearchResponse {
    /// The list of hits, ordered by relevance then priority.
    pub results: Vec<TicketHit>,

    /// Total number of matching documents.
    /// May be greater than the number of returned results.
    pub total: u64,
}

impl TicketSearchResponse {
    /// Create an empty search response.
    pub fn empty() -> Self {
        Self {
            results: Vec::new(),
            total: 0,
        }
    }

    /// Create a new search response.
    pub fn new(results: Vec<TicketHit>, total: u64) -> Self {
        Self { results, total }
    }

    /// Returns true if there are no results.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Returns the number of results in this response.
    pub fn len(&self) -> usize {
        self.results.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit() -> TicketHit {
        TicketHit {
            id: "a@x.com".to_string(),
            title: "Refund".to_string(),
            description: "Double charged".to_string(),
            customer_email: "a@x.com".to_string(),
            tags: "billing".to_string(),
            status: "open".to_string(),
            created_date: "2024-01-01".to_string(),
            priority: 2,
            category: "billing".to_string(),
            score: 1.5,
            highlights: None,
        }
    }

    #[test]
    fn test_search_response_empty() {
        let response = TicketSearchResponse::empty();
        assert!(response.is_empty());
        assert_eq!(response.len(), 0);
        assert_eq!(response.total, 0);
    }

    #[test]
    fn test_search_response_new() {
        let response = TicketSearchResponse::new(vec![hit()], 7);
        assert!(!response.is_empty());
        assert_eq!(response.len(), 1);
        assert_eq!(response.total, 7);
    }

    #[test]
    fn test_highlights_omitted_when_absent() {
        let json = serde_json::to_value(hit()).unwrap();
        assert!(json.get("highlights").is_none());
        assert_eq!(json["score"], 1.5);
    }
}
