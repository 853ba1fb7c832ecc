//! Source module for the support indexer ingest.
//!
//! Discovers batch files and parses them into raw rows.

mod csv_source;

pub use csv_source::{discover_batch_files, read_rows, RawRow, BATCH_FILE_EXTENSION};
