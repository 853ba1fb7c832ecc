//! OpenSearch index configuration and mappings.
//!
//! This module defines the index settings and mappings for the support case index.

use serde_json::{json, Value};

/// The default name of the support case index.
pub const INDEX_NAME: &str = "support_cases";

/// Configuration for the search index.
#[derive(Debug, Clone)]
pub struct IndexConfig {
    /// The index name used for all operations.
    pub name: String,
}

impl IndexConfig {
    /// Create a new index configuration.
    ///
    /// # Arguments
    ///
    /// * `name` - The index name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self::new(INDEX_NAME)
    }
}

/// Get the mappings for the support case index.
///
/// The configuration includes:
/// - **text** (standard analyzer): `title`, `description`, `tags`, `agent_notes`
/// - **keyword**: `customer_email`, `ticket_id`, `status`, `category` for exact matching
/// - **date**: `created_date`, parsed by the store from the raw string
/// - **numeric**: `priority` (integer) and `resolution_time` (long)
pub fn get_index_settings() -> Value {
    json!({
        "mappings": {
            "properties": {
                "title": {
                    "type": "text",
                    "analyzer": "standard"
                },
                "description": {
                    "type": "text",
                    "analyzer": "standard"
                },
                "customer_email": {
                    "type": "keyword"
                },
                "tags": {
                    "type": "text",
                    "analyzer": "standard"
                },
                "ticket_id": {
                    "type": "keyword"
                },
                "created_date": {
                    "type": "date"
                },
                "status": {
                    "type": "keyword"
                },
                "priority": {
                    "type": "integer"
                },
                "category": {
                    "type": "keyword"
                },
                "resolution_time": {
                    "type": "long"
                },
                "agent_notes": {
                    "type": "text"
                }
            }
        }
    })
}
