//! # Support Indexer Repository
//!
//! This crate provides traits and implementations for interacting with the
//! support case index. It includes definitions for errors, interfaces, the
//! index mapping, and a concrete implementation for OpenSearch.

pub mod errors;
pub mod interfaces;
pub mod opensearch;
pub mod service;
pub mod types;

pub use errors::SearchIndexError;
pub use interfaces::SearchIndexProvider;
pub use opensearch::{IndexConfig, OpenSearchProvider};
pub use service::SearchIndexService;
pub use types::StatusPatchRequest;
