//! # Support Indexer
//!
//! Support case indexer - loads customer support ticket batch files into
//! OpenSearch and serves a small control API (health, status patch, search).
//!
//! ## Architecture
//!
//! The indexer follows the Source-Processor-Loader pattern:
//!
//! 1. **Source**: Discovers CSV batch files and parses them into raw rows
//! 2. **Processor**: Transforms raw rows into support case documents
//! 3. **Loader**: Upserts documents into OpenSearch, isolating failures per file
//! 4. **Orchestrator**: Serves HTTP, runs the initial load, flips readiness
//!
//! ## Modules
//!
//! - [`config`]: Configuration and dependency initialization
//! - [`source`]: Batch file discovery and CSV parsing
//! - [`processor`]: Transforms rows into documents
//! - [`loader`]: Indexes documents into OpenSearch
//! - [`readiness`]: Write-once readiness flag
//! - [`server`]: HTTP surface
//! - [`orchestrator`]: Coordinates startup
//! - [`errors`]: Error types for the ingest

pub mod config;
pub mod errors;
pub mod loader;
pub mod orchestrator;
pub mod processor;
pub mod readiness;
pub mod server;
pub mod source;

pub use config::{AppConfig, Dependencies};
pub use errors::IngestError;
pub use readiness::ReadinessGate;

use thiserror::Error;

/// Errors that can occur during indexer initialization or execution.
#[derive(Error, Debug)]
pub enum IndexingError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The index could not be provisioned.
    #[error("Schema error: {0}")]
    SchemaError(String),

    /// The HTTP server failed to bind or crashed.
    #[error("Server error: {0}")]
    ServerError(String),

    /// Ingest error.
    #[error("Ingest error: {0}")]
    IngestError(#[from] IngestError),
}

impl IndexingError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Create a schema error.
    pub fn schema(msg: impl Into<String>) -> Self {
        Self::SchemaError(msg.into())
    }

    /// Create a server error.
    pub fn server(msg: impl Into<String>) -> Self {
        Self::ServerError(msg.into())
    }
}
