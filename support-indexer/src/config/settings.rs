//! Environment-driven settings.

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

use crate::loader::RowErrorPolicy;
use crate::IndexingError;
use support_indexer_repository::opensearch::INDEX_NAME;

/// Default store host.
const DEFAULT_STORE_HOST: &str = "localhost";

/// Default store port.
const DEFAULT_STORE_PORT: u16 = 9200;

/// Default batch file directory.
const DEFAULT_DATA_DIR: &str = "/data";

/// Default HTTP bind host.
const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default HTTP port.
const DEFAULT_SERVER_PORT: u16 = 5000;

/// Default connection retry interval in seconds.
const DEFAULT_RETRY_INTERVAL_SECS: u64 = 5;

/// Connection mode for the document store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionMode {
    /// Fail immediately if the store is unreachable.
    FailFast,
    /// Ping the store at a fixed interval until it answers.
    #[default]
    Retry,
}

impl ConnectionMode {
    /// Parse a connection mode.
    ///
    /// Valid values: "fail-fast" or "retry" (case-insensitive).
    /// Defaults to "retry" if not set or invalid.
    pub fn from_value(value: Option<&str>) -> Self {
        match value.map(str::to_lowercase).as_deref() {
            Some("fail-fast" | "failfast" | "fail_fast") => Self::FailFast,
            None | Some("retry") => Self::Retry,
            Some(other) => {
                warn!(value = %other, "Invalid STORE_CONNECTION_MODE, defaulting to 'retry'");
                Self::Retry
            }
        }
    }
}

/// Runtime configuration of the indexer.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub store_host: String,
    pub store_port: u16,
    pub index_name: String,
    pub data_dir: PathBuf,
    pub bind_addr: SocketAddr,
    pub connection_mode: ConnectionMode,
    pub retry_interval: Duration,
    pub row_error_policy: RowErrorPolicy,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `STORE_HOST`: Document store host (default: localhost)
    /// - `STORE_PORT`: Document store port (default: 9200)
    /// - `INDEX_NAME`: Index name (default: support_cases)
    /// - `DATA_DIR`: Batch file directory (default: /data)
    /// - `SERVER_HOST`: HTTP bind address (default: 0.0.0.0)
    /// - `SERVER_PORT`: HTTP port (default: 5000)
    /// - `STORE_CONNECTION_MODE`: "fail-fast" or "retry" (default: retry)
    /// - `STORE_RETRY_INTERVAL_SECS`: Ping retry interval in seconds (default: 5)
    /// - `LOADER_ROW_ERROR_POLICY`: "abort-file" or "skip-row" (default: abort-file)
    pub fn from_env() -> Result<Self, IndexingError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, IndexingError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store_host = lookup("STORE_HOST").unwrap_or_else(|| DEFAULT_STORE_HOST.to_string());
        let store_port = parse_port(lookup("STORE_PORT"), "STORE_PORT", DEFAULT_STORE_PORT)?;
        let index_name = lookup("INDEX_NAME").unwrap_or_else(|| INDEX_NAME.to_string());
        let data_dir = PathBuf::from(
            lookup("DATA_DIR").unwrap_or_else(|| DEFAULT_DATA_DIR.to_string()),
        );

        let server_host = lookup("SERVER_HOST").unwrap_or_else(|| DEFAULT_SERVER_HOST.to_string());
        let server_ip: IpAddr = server_host
            .parse()
            .map_err(|e| IndexingError::config(format!("Invalid SERVER_HOST '{}': {}", server_host, e)))?;
        let server_port = parse_port(lookup("SERVER_PORT"), "SERVER_PORT", DEFAULT_SERVER_PORT)?;

        let connection_mode = ConnectionMode::from_value(lookup("STORE_CONNECTION_MODE").as_deref());
        let retry_interval = lookup("STORE_RETRY_INTERVAL_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_RETRY_INTERVAL_SECS);
        let row_error_policy =
            RowErrorPolicy::from_value(lookup("LOADER_ROW_ERROR_POLICY").as_deref());

        Ok(Self {
            store_host,
            store_port,
            index_name,
            data_dir,
            bind_addr: SocketAddr::new(server_ip, server_port),
            connection_mode,
            retry_interval: Duration::from_secs(retry_interval),
            row_error_policy,
        })
    }

    /// The store URL built from host and port.
    pub fn store_url(&self) -> String {
        format!("http://{}:{}", self.store_host, self.store_port)
    }
}

fn parse_port(value: Option<String>, name: &str, default: u16) -> Result<u16, IndexingError> {
    match value {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<u16>()
            .map_err(|e| IndexingError::config(format!("Invalid {} '{}': {}", name, raw, e))),
    }
}
