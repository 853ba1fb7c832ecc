//! Processor module for the support indexer ingest.
//!
//! Transforms raw batch rows into support case documents.

mod record_processor;

pub use record_processor::{RecordProcessor, REQUIRED_COLUMNS};
