//! Search index service implementation.
//!
//! This module provides the main service used at request time: the status
//! patch and ticket search. Both validate their input before any call reaches
//! the provider.
//!
//! # Note on Multiple Documents per Customer
//!
//! Ingestion keys documents by customer email, so normally a customer has one
//! document. The status patch matches on the `customer_email` field rather than
//! on the document id, so if several documents share an email (for instance
//! written by another process) all of them are patched.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::errors::SearchIndexError;
use crate::interfaces::SearchIndexProvider;
use crate::types::StatusPatchRequest;
use support_indexer_shared::{TicketSearchQuery, TicketSearchResponse};

/// The main service for request-time operations on the search index.
///
/// This is the high-level API that the HTTP layer uses. It provides input
/// validation and delegates to a `SearchIndexProvider` for actual backend
/// operations.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use support_indexer_repository::{IndexConfig, OpenSearchProvider, SearchIndexService};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let provider = OpenSearchProvider::new("http://localhost:9200", IndexConfig::default()).await?;
/// let service = SearchIndexService::new(Arc::new(provider));
///
/// let updated = service.patch_status("a@x.com", "resolved").await?;
/// println!("patched {} tickets", updated);
/// # Ok(())
/// # }
/// ```
pub struct SearchIndexService {
    provider: Arc<dyn SearchIndexProvider>,
}

impl SearchIndexService {
    /// Create a new SearchIndexService.
    ///
    /// # Arguments
    ///
    /// * `provider` - A shared implementation of `SearchIndexProvider` (e.g., `OpenSearchProvider`)
    pub fn new(provider: Arc<dyn SearchIndexProvider>) -> Self {
        Self { provider }
    }

    /// Validate that a required request field is present.
    ///
    /// Returns the value without surrounding whitespace.
    fn require<'a>(field_name: &str, value: &'a str) -> Result<&'a str, SearchIndexError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(SearchIndexError::validation(format!(
                "{} is required",
                field_name
            )));
        }
        Ok(value)
    }

    /// Set the status of every ticket belonging to a customer.
    ///
    /// # Arguments
    ///
    /// * `customer_email` - The customer whose tickets are patched
    /// * `status` - The new status value
    ///
    /// # Returns
    ///
    /// * `Ok(u64)` - The number of documents updated (zero when the customer is unknown)
    /// * `Err(SearchIndexError::ValidationError)` - If either argument is empty; the store is not touched
    /// * `Err(SearchIndexError)` - If the store rejects or fails the update
    #[instrument(skip(self))]
    pub async fn patch_status(
        &self,
        customer_email: &str,
        status: &str,
    ) -> Result<u64, SearchIndexError> {
        let customer_email = Self::require("email", customer_email)?;
        let status = Self::require("status", status)?;

        let request = StatusPatchRequest::new(customer_email, status);
        let updated = self.provider.update_status_by_email(&request).await?;

        info!(updated = updated, "Ticket status patched");
        Ok(updated)
    }

    /// Search tickets.
    ///
    /// # Returns
    ///
    /// * `Ok(TicketSearchResponse)` - The matching tickets
    /// * `Err(SearchIndexError::ValidationError)` - If the query text is empty
    /// * `Err(SearchIndexError)` - If the search fails
    pub async fn search(
        &self,
        query: TicketSearchQuery,
    ) -> Result<TicketSearchResponse, SearchIndexError> {
        query.validate().map_err(SearchIndexError::validation)?;
        self.provider.search(&query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use support_indexer_shared::SupportCaseDocument;
    use tokio::sync::Mutex;

    /// Mock provider holding documents by id.
    struct MockProvider {
        documents: Mutex<HashMap<String, SupportCaseDocument>>,
        patch_requests: Mutex<Vec<StatusPatchRequest>>,
        search_requests: Mutex<Vec<TicketSearchQuery>>,
        should_fail: bool,
    }

    impl MockProvider {
        fn new() -> Self {
            Self {
                documents: Mutex::new(HashMap::new()),
                patch_requests: Mutex::new(Vec::new()),
                search_requests: Mutex::new(Vec::new()),
                should_fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                should_fail: true,
                ..Self::new()
            }
        }

        async fn seed(&self, id: &str, document: SupportCaseDocument) {
            self.documents
                .lock()
                .await
                .insert(id.to_string(), document);
        }
    }

    #[async_trait]
    impl SearchIndexProvider for MockProvider {
        async fn ping(&self) -> Result<(), SearchIndexError> {
            Ok(())
        }

        async fn ensure_index_exists(&self) -> Result<(), SearchIndexError> {
            Ok(())
        }

        async fn index_document(
            &self,
            document: &SupportCaseDocument,
        ) -> Result<(), SearchIndexError> {
            self.seed(document.document_id(), document.clone()).await;
            Ok(())
        }

        async fn update_status_by_email(
            &self,
            request: &StatusPatchRequest,
        ) -> Result<u64, SearchIndexError> {
            self.patch_requests.lock().await.push(request.clone());
            if self.should_fail {
                return Err(SearchIndexError::update("Mock failure"));
            }

            let mut updated = 0;
            for doc in self.documents.lock().await.values_mut() {
                if doc.customer_email == request.customer_email {
                    doc.status = request.status.clone();
                    updated += 1;
                }
            }
            Ok(updated)
        }

        async fn search(
            &self,
            query: &TicketSearchQuery,
        ) -> Result<TicketSearchResponse, SearchIndexError> {
            self.search_requests.lock().await.push(query.clone());
            if self.should_fail {
                return Err(SearchIndexError::search("Mock failure"));
            }
            Ok(TicketSearchResponse::empty())
        }
    }

    fn ticket(email: &str, ticket_id: &str) -> SupportCaseDocument {
        SupportCaseDocument::new(
            "Cannot log in",
            "Reset link expired",
            email,
            "auth",
            ticket_id,
            "2024-01-15",
            "open",
        )
    }

    #[tokio::test]
    async fn test_patch_status_rejects_empty_email() {
        let provider = Arc::new(MockProvider::new());
        let service = SearchIndexService::new(provider.clone());

        let result = service.patch_status("", "closed").await;

        assert!(matches!(result, Err(SearchIndexError::ValidationError(_))));
        assert!(provider.patch_requests.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_patch_status_rejects_empty_status() {
        let provider = Arc::new(MockProvider::new());
        let service = SearchIndexService::new(provider.clone());

        let result = service.patch_status("a@x.com", "  ").await;

        assert!(matches!(result, Err(SearchIndexError::ValidationError(_))));
        assert!(provider.patch_requests.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_patch_status_trims_surrounding_whitespace() {
        let provider = Arc::new(MockProvider::new());
        provider.seed("doc-1", ticket("a@x.com", "T-1")).await;
        let service = SearchIndexService::new(provider.clone());

        let updated = service.patch_status(" a@x.com ", " closed").await.unwrap();

        assert_eq!(updated, 1);
        let requests = provider.patch_requests.lock().await;
        assert_eq!(requests[0], StatusPatchRequest::new("a@x.com", "closed"));
        assert_eq!(provider.documents.lock().await["doc-1"].status, "closed");
    }

    #[tokio::test]
    async fn test_patch_status_updates_every_matching_document() {
        let provider = Arc::new(MockProvider::new());
        provider.seed("doc-1", ticket("a@x.com", "T-1")).await;
        provider.seed("doc-2", ticket("a@x.com", "T-2")).await;
        provider.seed("doc-3", ticket("b@x.com", "T-3")).await;
        let service = SearchIndexService::new(provider.clone());

        let updated = service.patch_status("a@x.com", "resolved").await.unwrap();

        assert_eq!(updated, 2);
        let documents = provider.documents.lock().await;
        for id in ["doc-1", "doc-2"] {
            let doc = &documents[id];
            assert_eq!(doc.status, "resolved");
            assert_eq!(doc.title, "Cannot log in");
            assert_eq!(doc.priority, 3);
        }
        assert_eq!(documents["doc-1"].ticket_id, "T-1");
        assert_eq!(documents["doc-2"].ticket_id, "T-2");
        assert_eq!(documents["doc-3"].status, "open");
    }

    #[tokio::test]
    async fn test_patch_status_unknown_customer_updates_nothing() {
        let provider = Arc::new(MockProvider::new());
        let service = SearchIndexService::new(provider.clone());

        let updated = service.patch_status("nobody@x.com", "closed").await.unwrap();

        assert_eq!(updated, 0);
        assert!(provider.documents.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_patch_status_surfaces_store_error() {
        let service = SearchIndexService::new(Arc::new(MockProvider::failing()));

        let err = service.patch_status("a@x.com", "closed").await.unwrap_err();

        assert!(!err.is_invalid_request());
        assert!(err.to_string().contains("Mock failure"));
    }

    #[tokio::test]
    async fn test_search_rejects_empty_query() {
        let provider = Arc::new(MockProvider::new());
        let service = SearchIndexService::new(provider.clone());

        let result = service.search(TicketSearchQuery::new("")).await;

        assert!(matches!(result, Err(SearchIndexError::ValidationError(_))));
        assert!(provider.search_requests.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_search_delegates_to_provider() {
        let provider = Arc::new(MockProvider::new());
        let service = SearchIndexService::new(provider.clone());

        let query = TicketSearchQuery::new("login").unresolved_only(true);
        let response = service.search(query.clone()).await.unwrap();

        assert!(response.is_empty());
        assert_eq!(provider.search_requests.lock().await.as_slice(), &[query]);
    }
}
