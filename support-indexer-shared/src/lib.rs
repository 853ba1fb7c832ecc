//! # Support Indexer Shared
//!
//! This crate defines shared data structures used across the support case indexer.
//! It includes the canonical support case document and the ticket search types.

pub mod types;

pub use types::search_query::{PriorityOrder, TicketSearchQuery};
pub use types::search_result::{TicketHit, TicketSearchResponse};
pub use types::support_case_document::{
    SupportCaseDocument, DEFAULT_CATEGORY, DEFAULT_PRIORITY,
};
