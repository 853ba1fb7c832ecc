//! Dependency initialization and wiring for the support indexer.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

use super::settings::{AppConfig, ConnectionMode};
use crate::loader::{BatchLoader, LoaderConfig};
use crate::orchestrator::{Orchestrator, OrchestratorConfig};
use crate::readiness::ReadinessGate;
use crate::IndexingError;
use support_indexer_repository::opensearch::IndexConfig;
use support_indexer_repository::{OpenSearchProvider, SearchIndexProvider, SearchIndexService};

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The configured orchestrator ready to run.
    pub orchestrator: Orchestrator,
}

impl Dependencies {
    /// Initialize all dependencies from the given configuration.
    ///
    /// Blocks until the store answers a ping (retry mode), then provisions the
    /// index before anything is loaded.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(IndexingError)` - If the store is unreachable in fail-fast mode or
    ///   the index cannot be created
    pub async fn new(config: &AppConfig) -> Result<Self, IndexingError> {
        let store_url = config.store_url();

        info!(
            store_url = %store_url,
            index = %config.index_name,
            data_dir = %config.data_dir.display(),
            bind_addr = %config.bind_addr,
            connection_mode = ?config.connection_mode,
            retry_interval_secs = config.retry_interval.as_secs(),
            row_error_policy = ?config.row_error_policy,
            "Initializing dependencies"
        );

        let provider = OpenSearchProvider::new(&store_url, IndexConfig::new(&config.index_name))
            .await
            .map_err(|e| IndexingError::config(format!("Failed to create OpenSearch provider: {}", e)))?;
        let provider: Arc<dyn SearchIndexProvider> = Arc::new(provider);

        wait_for_store(provider.as_ref(), config.connection_mode, config.retry_interval).await?;
        info!("Document store connection established");

        provision_index(provider.as_ref()).await?;

        let loader = BatchLoader::with_config(
            Arc::clone(&provider),
            LoaderConfig {
                row_error_policy: config.row_error_policy,
            },
        );
        let service = Arc::new(SearchIndexService::new(provider));

        let orchestrator = Orchestrator::new(
            loader,
            service,
            ReadinessGate::new(),
            OrchestratorConfig {
                data_dir: config.data_dir.clone(),
                bind_addr: config.bind_addr,
            },
        );

        Ok(Self { orchestrator })
    }
}

/// Ping the store until it answers.
///
/// In retry mode this never gives up; in fail-fast mode the first failed ping
/// is returned as a configuration error.
pub async fn wait_for_store(
    provider: &dyn SearchIndexProvider,
    mode: ConnectionMode,
    retry_interval: Duration,
) -> Result<(), IndexingError> {
    loop {
        match provider.ping().await {
            Ok(()) => return Ok(()),
            Err(e) => match mode {
                ConnectionMode::FailFast => {
                    return Err(IndexingError::config(format!(
                        "Failed to connect to document store: {}",
                        e
                    )));
                }
                ConnectionMode::Retry => {
                    warn!(
                        error = %e,
                        retry_interval_secs = retry_interval.as_secs(),
                        "Waiting for document store..."
                    );
                    sleep(retry_interval).await;
                }
            },
        }
    }
}

/// Create the index with its mapping unless it already exists.
pub async fn provision_index(provider: &dyn SearchIndexProvider) -> Result<(), IndexingError> {
    provider
        .ensure_index_exists()
        .await
        .map_err(|e| IndexingError::schema(format!("Failed to ensure index exists: {}", e)))?;

    info!("Index is provisioned");
    Ok(())
}
