//! Search query types for ticket search.
//!
//! This module defines the query structures used to search the index.

use serde::{Deserialize, Serialize};

/// Maximum number of hits a single search returns.
pub const MAX_SEARCH_LIMIT: usize = 100;

/// Secondary sort order applied to tickets with equal relevance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PriorityOrder {
    /// Highest priority value first. This is the default.
    #[default]
    PriorityHighToLow,

    /// Lowest priority value first.
    PriorityLowToHigh,
}

impl PriorityOrder {
    /// Parse a sort parameter, falling back to the default for unknown values.
    pub fn from_param(value: &str) -> Self {
        match value {
            "priority-low-to-high" => Self::PriorityLowToHigh,
            _ => Self::PriorityHighToLow,
        }
    }

    /// The store sort direction for the `priority` field.
    pub fn direction(&self) -> &'static str {
        match self {
            Self::PriorityHighToLow => "desc",
            Self::PriorityLowToHigh => "asc",
        }
    }
}

/// Ticket search parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TicketSearchQuery {
    /// Free text matched against title, description, tags and customer email.
    pub query: String,

    /// Exclude tickets whose status is `resolved`.
    #[serde(default)]
    pub filter_unresolved: bool,

    #[serde(default)]
    pub order: PriorityOrder,

    /// Maximum number of results to return.
    /// Default and maximum is 100.
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    MAX_SEARCH_LIMIT
}

impl TicketSearchQuery {
    /// Create a query over all tickets.
    ///
    /// # Example
    ///
    /// ```
    /// use support_indexer_shared::TicketSearchQuery;
    ///
    /// let query = TicketSearchQuery::new("refund").unresolved_only(true);
    /// assert!(query.filter_unresolved);
    /// ```
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            filter_unresolved: false,
            order: PriorityOrder::default(),
            limit: default_limit(),
        }
    }

    /// Restrict results to tickets that are not resolved.
    pub fn unresolved_only(mut self, filter_unresolved: bool) -> Self {
        self.filter_unresolved = filter_unresolved;
        self
    }

    /// Set the priority sort order.
    pub fn with_order(mut self, order: PriorityOrder) -> Self {
        self.order = order;
        self
    }

    /// Set the limit for results.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.min(MAX_SEARCH_LIMIT);
        self
    }

    /// Validate the query parameters.
    ///
    /// Returns an error message if validation fails.
    pub fn validate(&self) -> Result<(), String> {
        if self.query.trim().is_empty() {
            return Err("Query parameter is required".to_string());
        }
        Ok(())
    }
}
