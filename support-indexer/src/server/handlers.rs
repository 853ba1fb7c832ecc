// HTTP request handlers
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, error, info};

use crate::server::state::AppState;
use support_indexer_shared::{PriorityOrder, TicketSearchQuery};

/// Body of a status patch request.
///
/// Fields are optional so a missing field is reported as a validation failure
/// rather than a body parse failure.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub email: Option<String>,
    pub status: Option<String>,
}

/// Query string of a search request.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    #[serde(rename = "filterUnresolved")]
    pub filter_unresolved: Option<String>,
    pub sort: Option<String>,
}

/// Health check endpoint - reports whether the initial load has completed
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "ready": state.readiness.is_ready(),
            "timestamp": Utc::now().timestamp_millis(),
        })),
    )
}

/// Status endpoint - sets the status of every ticket of one customer
pub async fn update_status(
    State(state): State<AppState>,
    payload: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> (StatusCode, Json<Value>) {
    let Json(request) = match payload {
        Ok(body) => body,
        Err(e) => {
            debug!(error = %e, "Rejected status update body");
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Missing email or status" })),
            );
        }
    };

    let email = request.email.unwrap_or_default();
    let status = request.status.unwrap_or_default();

    match state.service.patch_status(&email, &status).await {
        Ok(updated) => {
            info!(email = %email, status = %status, updated = updated, "Status updated");
            (StatusCode::OK, Json(json!({ "success": true })))
        }
        Err(e) if e.is_invalid_request() => {
            debug!(error = %e, "Invalid status update request");
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Missing email or status" })),
            )
        }
        Err(e) => {
            error!(email = %email, error = %e, "Failed to update status");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
        }
    }
}

/// Search endpoint - free text search over tickets
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> (StatusCode, Json<Value>) {
    let text = params.q.unwrap_or_default();
    let filter_unresolved = params
        .filter_unresolved
        .as_deref()
        .is_some_and(|v| v.eq_ignore_ascii_case("true"));
    let order = params
        .sort
        .as_deref()
        .map(PriorityOrder::from_param)
        .unwrap_or_default();

    let query = TicketSearchQuery::new(text.clone())
        .unresolved_only(filter_unresolved)
        .with_order(order);

    match state.service.search(query).await {
        Ok(response) => (
            StatusCode::OK,
            Json(json!({
                "results": response.results,
                "total": response.total,
                "query": text,
                "filterUnresolved": filter_unresolved,
            })),
        ),
        Err(e) if e.is_invalid_request() => {
            debug!(error = %e, "Invalid search request");
            (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "results": [],
                    "error": "Query parameter is required",
                    "query": text,
                })),
            )
        }
        Err(e) => {
            error!(query = %text, error = %e, "Search failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "results": [],
                    "error": "Search failed",
                    "query": text,
                })),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::readiness::ReadinessGate;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};
    use support_indexer_repository::{
        SearchIndexError, SearchIndexProvider, SearchIndexService, StatusPatchRequest,
    };
    use support_indexer_shared::{SupportCaseDocument, TicketHit, TicketSearchResponse};

    /// Mock provider recording patch and search calls.
    #[derive(Default)]
    struct MockProvider {
        patches: Mutex<Vec<StatusPatchRequest>>,
        searches: Mutex<Vec<TicketSearchQuery>>,
        fail: bool,
    }

    #[async_trait]
    impl SearchIndexProvider for MockProvider {
        async fn ping(&self) -> Result<(), SearchIndexError> {
            Ok(())
        }

        async fn ensure_index_exists(&self) -> Result<(), SearchIndexError> {
            Ok(())
        }

        async fn index_document(&self, _: &SupportCaseDocument) -> Result<(), SearchIndexError> {
            Ok(())
        }

        async fn update_status_by_email(
            &self,
            request: &StatusPatchRequest,
        ) -> Result<u64, SearchIndexError> {
            if self.fail {
                return Err(SearchIndexError::update("cluster_block_exception"));
            }
            self.patches.lock().unwrap().push(request.clone());
            Ok(1)
        }

        async fn search(
            &self,
            query: &TicketSearchQuery,
        ) -> Result<TicketSearchResponse, SearchIndexError> {
            if self.fail {
                return Err(SearchIndexError::search("search_phase_execution_exception"));
            }
            self.searches.lock().unwrap().push(query.clone());
            let hit = TicketHit {
                id: "a@x.com".to_string(),
                title: "Cannot log in".to_string(),
                description: "Reset link expired".to_string(),
                customer_email: "a@x.com".to_string(),
                tags: "auth".to_string(),
                status: "open".to_string(),
                created_date: "2024-01-15".to_string(),
                priority: 1,
                category: "account".to_string(),
                score: 4.2,
                highlights: None,
            };
            Ok(TicketSearchResponse::new(vec![hit], 1))
        }
    }

    fn state_with(provider: Arc<MockProvider>) -> AppState {
        AppState::new(
            Arc::new(SearchIndexService::new(provider)),
            ReadinessGate::new(),
        )
    }

    fn body(email: Option<&str>, status: Option<&str>) -> Result<Json<UpdateStatusRequest>, JsonRejection> {
        Ok(Json(UpdateStatusRequest {
            email: email.map(str::to_string),
            status: status.map(str::to_string),
        }))
    }

    #[tokio::test]
    async fn test_health_reflects_gate() {
        let state = state_with(Arc::new(MockProvider::default()));

        let (code, Json(before)) = health(State(state.clone())).await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(before["ready"], false);
        assert!(before["timestamp"].as_i64().unwrap() > 0);

        state.readiness.mark_ready();

        let (_, Json(after)) = health(State(state)).await;
        assert_eq!(after["ready"], true);
    }

    #[tokio::test]
    async fn test_update_status_success() {
        let provider = Arc::new(MockProvider::default());
        let state = state_with(provider.clone());

        let (code, Json(resp)) =
            update_status(State(state), body(Some("a@x.com"), Some("resolved"))).await;

        assert_eq!(code, StatusCode::OK);
        assert_eq!(resp, json!({ "success": true }));
        let patches = provider.patches.lock().unwrap();
        assert_eq!(patches.len(), 1);
        assert_eq!(patches[0].customer_email, "a@x.com");
        assert_eq!(patches[0].status, "resolved");
    }

    #[tokio::test]
    async fn test_update_status_missing_fields() {
        let provider = Arc::new(MockProvider::default());
        let state = state_with(provider.clone());

        for (email, status) in [
            (None, Some("closed")),
            (Some(""), Some("closed")),
            (Some("a@x.com"), None),
            (Some("a@x.com"), Some("  ")),
        ] {
            let (code, Json(resp)) = update_status(State(state.clone()), body(email, status)).await;
            assert_eq!(code, StatusCode::BAD_REQUEST);
            assert_eq!(resp["error"], "Missing email or status");
        }

        assert!(provider.patches.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_status_store_failure() {
        let provider = Arc::new(MockProvider {
            fail: true,
            ..Default::default()
        });
        let state = state_with(provider);

        let (code, Json(resp)) =
            update_status(State(state), body(Some("a@x.com"), Some("resolved"))).await;

        assert_eq!(code, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(resp["error"]
            .as_str()
            .unwrap()
            .contains("cluster_block_exception"));
    }

    #[tokio::test]
    async fn test_search_success_parses_params() {
        let provider = Arc::new(MockProvider::default());
        let state = state_with(provider.clone());
        let params = SearchParams {
            q: Some("login".to_string()),
            filter_unresolved: Some("true".to_string()),
            sort: Some("priority-low-to-high".to_string()),
        };

        let (code, Json(resp)) = search(State(state), Query(params)).await;

        assert_eq!(code, StatusCode::OK);
        assert_eq!(resp["total"], 1);
        assert_eq!(resp["query"], "login");
        assert_eq!(resp["filterUnresolved"], true);
        assert_eq!(resp["results"][0]["customer_email"], "a@x.com");

        let searches = provider.searches.lock().unwrap();
        assert!(searches[0].filter_unresolved);
        assert_eq!(searches[0].order, PriorityOrder::PriorityLowToHigh);
    }

    #[tokio::test]
    async fn test_search_missing_query() {
        let provider = Arc::new(MockProvider::default());
        let state = state_with(provider.clone());

        let (code, Json(resp)) = search(State(state), Query(SearchParams::default())).await;

        assert_eq!(code, StatusCode::BAD_REQUEST);
        assert_eq!(resp["error"], "Query parameter is required");
        assert_eq!(resp["results"], json!([]));
        assert!(provider.searches.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_store_failure() {
        let provider = Arc::new(MockProvider {
            fail: true,
            ..Default::default()
        });
        let state = state_with(provider);
        let params = SearchParams {
            q: Some("login".to_string()),
            ..Default::default()
        };

        let (code, Json(resp)) = search(State(state), Query(params)).await;

        assert_eq!(code, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(resp["error"], "Search failed");
    }
}
