//! Orchestrator module for the support indexer.
//!
//! Coordinates the HTTP server, the initial batch load and the readiness gate.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tracing::{error, info, instrument, warn};

use crate::loader::{BatchLoader, LoadSummary};
use crate::readiness::ReadinessGate;
use crate::server::{self, AppState};
use crate::IndexingError;
use support_indexer_repository::SearchIndexService;

/// Configuration for the orchestrator.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Directory scanned for batch files at startup.
    pub data_dir: PathBuf,
    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,
}

/// Orchestrator that coordinates startup and shutdown.
///
/// The orchestrator:
/// - Binds the HTTP server before any file is loaded, so health checks answer
///   `ready = false` while the load runs
/// - Runs one load pass over the data directory
/// - Flips the readiness gate once the pass completes, whatever its outcome
/// - Keeps serving until a shutdown signal is received
pub struct Orchestrator {
    loader: BatchLoader,
    service: Arc<SearchIndexService>,
    readiness: ReadinessGate,
    config: OrchestratorConfig,
    shutdown_tx: broadcast::Sender<()>,
}

impl Orchestrator {
    /// Create a new orchestrator with the given components.
    pub fn new(
        loader: BatchLoader,
        service: Arc<SearchIndexService>,
        readiness: ReadinessGate,
        config: OrchestratorConfig,
    ) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);

        Self {
            loader,
            service,
            readiness,
            config,
            shutdown_tx,
        }
    }

    /// The readiness gate shared with the HTTP handlers.
    pub fn readiness(&self) -> &ReadinessGate {
        &self.readiness
    }

    /// Load every batch file, then mark the service ready.
    #[instrument(skip(self))]
    pub async fn initial_load(&self) -> LoadSummary {
        let summary = self.loader.load_all(&self.config.data_dir).await;

        for report in summary.failed_files() {
            warn!(file = %report.path.display(), "Batch file not fully loaded");
        }

        if self.readiness.mark_ready() {
            info!(
                total_indexed = summary.total_indexed(),
                total_skipped = summary.total_skipped(),
                "Initial load finished, service is ready"
            );
        }
        summary
    }

    /// Run the orchestrator on the configured address.
    ///
    /// Blocks until a shutdown signal is received or the server fails.
    pub async fn run(&self) -> Result<(), IndexingError> {
        let listener = TcpListener::bind(self.config.bind_addr)
            .await
            .map_err(|e| {
                IndexingError::server(format!("Failed to bind {}: {}", self.config.bind_addr, e))
            })?;

        self.run_with_listener(listener).await
    }

    /// Run the orchestrator on an already bound listener.
    #[instrument(skip(self, listener))]
    pub async fn run_with_listener(&self, listener: TcpListener) -> Result<(), IndexingError> {
        info!("Starting support indexer orchestrator");

        let mut shutdown_rx = self.shutdown_tx.subscribe();
        let mut server_shutdown_rx = self.shutdown_tx.subscribe();

        let app = server::create_app(AppState::new(
            Arc::clone(&self.service),
            self.readiness.clone(),
        ));
        let mut server_handle = tokio::spawn(server::run_server(listener, app, async move {
            let _ = server_shutdown_rx.recv().await;
        }));

        self.initial_load().await;

        // A shutdown requested during the load also stops the server, so the
        // request must win over the server's exit.
        let result = tokio::select! {
            biased;

            _ = shutdown_rx.recv() => {
                info!("Shutdown requested");
                Ok(())
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Received shutdown signal");
                Ok(())
            }
            joined = &mut server_handle => {
                let result = match joined {
                    Ok(Ok(())) => Err(IndexingError::server("Server stopped unexpectedly")),
                    Ok(Err(e)) => Err(e),
                    Err(e) => Err(IndexingError::server(format!("Server task failed: {}", e))),
                };
                if let Err(e) = &result {
                    error!(error = %e, "HTTP server exited");
                }
                return result;
            }
        };

        let _ = self.shutdown_tx.send(());
        match server_handle.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => error!(error = %e, "HTTP server failed during shutdown"),
            Err(e) => error!(error = %e, "HTTP server task failed during shutdown"),
        }

        info!("Orchestrator shutdown complete");
        result
    }

    /// A sender that triggers shutdown, usable after the orchestrator is moved.
    pub fn shutdown_handle(&self) -> broadcast::Sender<()> {
        self.shutdown_tx.clone()
    }
}
