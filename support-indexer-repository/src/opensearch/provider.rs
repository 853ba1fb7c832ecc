//! OpenSearch provider implementation.
//!
//! This module provides the concrete implementation of `SearchIndexProvider`
//! using the OpenSearch Rust crate.

use std::collections::HashMap;

use async_trait::async_trait;
use opensearch::{
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::{IndicesCreateParts, IndicesExistsParts},
    IndexParts, OpenSearch, SearchParts, UpdateByQueryParts,
};
use serde_json::{json, Value};
use tracing::{debug, error, info};
use url::Url;

use crate::errors::SearchIndexError;
use crate::interfaces::SearchIndexProvider;
use crate::opensearch::index_config::{get_index_settings, IndexConfig};
use crate::types::StatusPatchRequest;
use support_indexer_shared::{
    SupportCaseDocument, TicketHit, TicketSearchQuery, TicketSearchResponse, DEFAULT_CATEGORY,
    DEFAULT_PRIORITY,
};

/// Painless script applied by the status patch.
const SET_STATUS_SCRIPT: &str = "ctx._source.status = params.status";

/// The status value excluded by the unresolved filter.
const RESOLVED_STATUS: &str = "resolved";

/// OpenSearch provider implementation.
///
/// Provides document storage and full-text search using OpenSearch as the backend.
///
/// # Example
///
/// ```ignore
/// use support_indexer_repository::opensearch::{IndexConfig, OpenSearchProvider};
/// let provider = OpenSearchProvider::new("http://localhost:9200", IndexConfig::default()).await?;
/// provider.ping().await?;
/// provider.ensure_index_exists().await?;
/// ```
pub struct OpenSearchProvider {
    client: OpenSearch,
    index_config: IndexConfig,
}

impl OpenSearchProvider {
    /// Create a new OpenSearch provider connected to the specified URL.
    ///
    /// Building the client does not contact the server; use `ping` for that.
    ///
    /// # Arguments
    ///
    /// * `url` - The OpenSearch server URL (e.g., "http://localhost:9200")
    /// * `index_config` - The index configuration containing the index name
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchProvider)` - A new provider instance
    /// * `Err(SearchIndexError)` - If the URL is invalid or transport setup fails
    pub async fn new(url: &str, index_config: IndexConfig) -> Result<Self, SearchIndexError> {
        let parsed_url =
            Url::parse(url).map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .build()
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(
            url = %url,
            index = %index_config.name,
            "Created OpenSearch provider"
        );

        Ok(Self {
            client,
            index_config,
        })
    }

    /// Build the update-by-query body for a status patch.
    ///
    /// Uses a `term` query so the keyword field is matched exactly.
    fn status_patch_body(request: &StatusPatchRequest) -> Value {
        json!({
            "query": {
                "term": {
                    "customer_email": request.customer_email
                }
            },
            "script": {
                "source": SET_STATUS_SCRIPT,
                "lang": "painless",
                "params": {
                    "status": request.status
                }
            }
        })
    }

    /// Build the search request body for a ticket query.
    ///
    /// Title matches weigh most among the text fields; a customer email substring
    /// match outranks all of them. Any single clause is enough to match.
    ///
    /// Hits are ordered by descending relevance first; priority and creation
    /// date only break ties.
    fn search_body(query: &TicketSearchQuery) -> Value {
        let mut filter = Vec::new();
        if query.filter_unresolved {
            filter.push(json!({
                "bool": {
                    "must_not": {
                        "term": { "status": RESOLVED_STATUS }
                    }
                }
            }));
        }

        json!({
            "query": {
                "bool": {
                    "should": [
                        {
                            "match": {
                                "title": {
                                    "query": query.query,
                                    "boost": 5.0,
                                    "fuzziness": "AUTO"
                                }
                            }
                        },
                        {
                            "match": {
                                "description": {
                                    "query": query.query,
                                    "boost": 2.0
                                }
                            }
                        },
                        {
                            "match": {
                                "tags": {
                                    "query": query.query,
                                    "boost": 0.5
                                }
                            }
                        },
                        {
                            "wildcard": {
                                "customer_email": {
                                    "value": format!("*{}*", query.query),
                                    "boost": 10.0
                                }
                            }
                        }
                    ],
                    "filter": filter,
                    "minimum_should_match": 1
                }
            },
            "sort": [
                { "_score": { "order": "desc" } },
                { "priority": { "order": query.order.direction() } },
                { "created_date": { "order": "asc" } }
            ],
            "highlight": {
                "fields": {
                    "title": {},
                    "description": {}
                }
            },
            "size": query.limit
        })
    }

    /// Convert a raw search response into ticket hits.
    ///
    /// Accepts both the object (`{"value": n}`) and the legacy numeric form of
    /// `hits.total`. Missing `priority`/`category` fall back to their defaults.
    fn parse_search_response(body: &Value) -> Result<TicketSearchResponse, SearchIndexError> {
        let hits = body
            .get("hits")
            .ok_or_else(|| SearchIndexError::parse("Search response has no hits section"))?;

        let total = match &hits["total"] {
            Value::Object(total) => total.get("value").and_then(Value::as_u64).unwrap_or(0),
            other => other.as_u64().unwrap_or(0),
        };

        let mut results = Vec::new();
        for hit in hits["hits"].as_array().map(Vec::as_slice).unwrap_or(&[]) {
            let source = &hit["_source"];
            let text = |field: &str| source[field].as_str().unwrap_or_default().to_string();

            let highlights = hit
                .get("highlight")
                .map(|h| serde_json::from_value::<HashMap<String, Vec<String>>>(h.clone()))
                .transpose()
                .map_err(|e| SearchIndexError::parse(format!("Invalid highlight: {}", e)))?;

            results.push(TicketHit {
                id: hit["_id"].as_str().unwrap_or_default().to_string(),
                title: text("title"),
                description: text("description"),
                customer_email: text("customer_email"),
                tags: text("tags"),
                status: text("status"),
                created_date: text("created_date"),
                priority: source["priority"]
                    .as_i64()
                    .and_then(|p| i32::try_from(p).ok())
                    .unwrap_or(DEFAULT_PRIORITY),
                category: source["category"]
                    .as_str()
                    .filter(|c| !c.is_empty())
                    .unwrap_or(DEFAULT_CATEGORY)
                    .to_string(),
                score: hit["_score"].as_f64().unwrap_or(0.0),
                highlights,
            });
        }

        Ok(TicketSearchResponse::new(results, total))
    }
}

#[async_trait]
impl SearchIndexProvider for OpenSearchProvider {
    async fn ping(&self) -> Result<(), SearchIndexError> {
        let response = self
            .client
            .ping()
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            return Err(SearchIndexError::connection(format!(
                "Ping failed with status {}",
                status
            )));
        }
        Ok(())
    }

    /// Check for the index and create it with the support case mapping when absent.
    ///
    /// A concurrent creator winning the race (`resource_already_exists_exception`)
    /// counts as success.
    async fn ensure_index_exists(&self) -> Result<(), SearchIndexError> {
        let name = self.index_config.name.as_str();

        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[name]))
            .send()
            .await
            .map_err(|e| SearchIndexError::index_creation(e.to_string()))?;

        let status = response.status_code();
        if status.is_success() {
            debug!(index = %name, "Index already exists");
            return Ok(());
        }
        if status.as_u16() != 404 {
            return Err(SearchIndexError::index_creation(format!(
                "Index existence check failed with status {}",
                status
            )));
        }

        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(name))
            .body(get_index_settings())
            .send()
            .await
            .map_err(|e| SearchIndexError::index_creation(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            if error_body.contains("resource_already_exists_exception") {
                debug!(index = %name, "Index created concurrently");
                return Ok(());
            }
            error!(status = %status, body = %error_body, "Index creation failed");
            return Err(SearchIndexError::index_creation(format!(
                "Create index failed with status {}: {}",
                status, error_body
            )));
        }

        info!(index = %name, "Created index");
        Ok(())
    }

    async fn index_document(&self, document: &SupportCaseDocument) -> Result<(), SearchIndexError> {
        let doc_id = document.document_id();

        let response = self
            .client
            .index(IndexParts::IndexId(&self.index_config.name, doc_id))
            .body(document)
            .send()
            .await
            .map_err(|e| SearchIndexError::index(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Index request failed");
            return Err(SearchIndexError::index(format!(
                "Index failed with status {}: {}",
                status, error_body
            )));
        }

        debug!(doc_id = %doc_id, "Document indexed");
        Ok(())
    }

    /// Apply the status patch with `update_by_query` and refresh the index.
    async fn update_status_by_email(
        &self,
        request: &StatusPatchRequest,
    ) -> Result<u64, SearchIndexError> {
        let response = self
            .client
            .update_by_query(UpdateByQueryParts::Index(&[self.index_config.name.as_str()]))
            .refresh(true)
            .body(Self::status_patch_body(request))
            .send()
            .await
            .map_err(|e| SearchIndexError::update(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Update by query failed");
            return Err(SearchIndexError::update(format!(
                "Update by query failed with status {}: {}",
                status, error_body
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SearchIndexError::parse(e.to_string()))?;
        let updated = body["updated"].as_u64().unwrap_or(0);

        debug!(
            customer_email = %request.customer_email,
            status = %request.status,
            updated = updated,
            "Status patched"
        );
        Ok(updated)
    }

    async fn search(
        &self,
        query: &TicketSearchQuery,
    ) -> Result<TicketSearchResponse, SearchIndexError> {
        let response = self
            .client
            .search(SearchParts::Index(&[self.index_config.name.as_str()]))
            .body(Self::search_body(query))
            .send()
            .await
            .map_err(|e| SearchIndexError::search(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Search request failed");
            return Err(SearchIndexError::search(format!(
                "Search failed with status {}: {}",
                status, error_body
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SearchIndexError::parse(e.to_string()))?;

        Self::parse_search_response(&body)
    }
}
