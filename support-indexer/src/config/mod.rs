//! Configuration and dependency initialization for the support indexer.

mod dependencies;
mod settings;

pub use dependencies::{provision_index, wait_for_store, Dependencies};
pub use settings::{AppConfig, ConnectionMode};
