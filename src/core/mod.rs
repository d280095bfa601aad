//! Reporting layer.
//!
//! This module contains:
//! - [`models`] - Report structure and output configuration
//! - [`processor`] - Aggregate statistics
//! - [`output`] - Format writers (CSV, JSON, JSONL)

pub mod models;
pub mod output;
pub mod processor;

pub use models::{LedgerReport, OutputConfig, ReportSummary, RowFlag};

#[cfg(feature = "csv-output")]
pub use output::{CsvSheets, to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{to_json, to_jsonl, write_json, write_jsonl};

pub use processor::LedgerStats;
