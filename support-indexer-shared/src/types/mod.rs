//! This module defines the core data structures used across the support case indexer.
//! It re-exports specific types like `SupportCaseDocument`.

pub mod search_query;
pub mod search_result;
pub mod support_case_document;

pub use search_query::{PriorityOrder, TicketSearchQuery};
pub use search_result::{TicketHit, TicketSearchResponse};
pub use support_case_document::SupportCaseDocument;
