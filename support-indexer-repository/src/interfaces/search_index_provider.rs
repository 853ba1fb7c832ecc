//! Search index provider trait definition.
//!
//! This module defines the abstract interface for search index operations,
//! allowing for different backend implementations (OpenSearch, Elasticsearch, etc.).

use async_trait::async_trait;

use crate::errors::SearchIndexError;
use crate::types::StatusPatchRequest;
use support_indexer_shared::{SupportCaseDocument, TicketSearchQuery, TicketSearchResponse};

/// Abstracts the underlying search index implementation (OpenSearch, Elasticsearch, etc.).
///
/// Implementations are injected into `SearchIndexService` and the batch loader to
/// enable dependency injection and easy testing with mock implementations.
///
/// All methods return `Result<T, SearchIndexError>` for consistent error handling across
/// different backend implementations.
///
/// # Index Initialization
///
/// Callers should wait for `ping` to succeed and then call `ensure_index_exists`
/// during application startup, before performing document operations.
#[async_trait]
pub trait SearchIndexProvider: Send + Sync {
    /// Check that the backend is reachable.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the backend answered
    /// * `Err(SearchIndexError::ConnectionError)` - If it did not
    async fn ping(&self) -> Result<(), SearchIndexError>;

    /// Ensure the search index exists with the support case mapping, creating it if necessary.
    ///
    /// Safe to call on every start: an existing index is left untouched.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the index is ready for use
    /// * `Err(SearchIndexError::IndexCreationError)` - If the index could not be checked or created
    async fn ensure_index_exists(&self) -> Result<(), SearchIndexError>;

    /// Write a document under its customer email, replacing any previous document.
    ///
    /// This is a full replacement (last write wins), not a partial merge.
    ///
    /// # Arguments
    ///
    /// * `document` - The document to store
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the document was written
    /// * `Err(SearchIndexError)` - If the write fails
    async fn index_document(&self, document: &SupportCaseDocument) -> Result<(), SearchIndexError>;

    /// Set `status` on every document whose `customer_email` equals the request's email.
    ///
    /// Never creates documents.
    ///
    /// # Returns
    ///
    /// * `Ok(u64)` - The number of documents updated (possibly zero)
    /// * `Err(SearchIndexError)` - If the query-scoped update fails
    async fn update_status_by_email(
        &self,
        request: &StatusPatchRequest,
    ) -> Result<u64, SearchIndexError>;

    /// Run a full-text ticket search.
    ///
    /// # Returns
    ///
    /// * `Ok(TicketSearchResponse)` - Hits ordered by relevance, then priority
    /// * `Err(SearchIndexError)` - If the search fails
    async fn search(
        &self,
        query: &TicketSearchQuery,
    ) -> Result<TicketSearchResponse, SearchIndexError>;
}
