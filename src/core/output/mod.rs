//! Report writers.
//!
//! This module provides writers for different output formats:
//! - [`write_csv`] / [`to_csv`] - three semicolon-delimited sheets (messages, issues, overview) - requires `csv-output` feature
//! - [`write_json`] / [`to_json`] - the whole report as one JSON document - requires `json-output` feature
//! - [`write_jsonl`] / [`to_jsonl`] - one tagged JSON record per line - requires `json-output` feature
//!
//! # Choosing a Format
//!
//! | Format | Use Case |
//! |--------|----------|
//! | CSV | Spreadsheet review by a person |
//! | JSON | Archiving, APIs |
//! | JSONL | Streaming into other tools |
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> chatledger::Result<()> {
//! use chrono::Utc;
//! use chatledger::core::models::{LedgerReport, OutputConfig};
//! use chatledger::core::output::{to_csv, write_csv, write_json};
//!
//! let report = LedgerReport::new(Vec::new(), Vec::new(), Utc::now());
//! let config = OutputConfig::new();
//!
//! write_csv(&report, "audit.csv", &config)?;
//! write_json(&report, "audit.json", &config)?;
//!
//! let sheets = to_csv(&report, &config)?;
//! assert!(sheets.overview.contains("Chat Ledger"));
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{CsvSheets, to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl};
