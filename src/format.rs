//! Report output formats.
//!
//! Library-level format types that don't depend on the CLI.
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn example() -> chatledger::Result<()> {
//! use chrono::Utc;
//! use chatledger::core::models::{LedgerReport, OutputConfig};
//! use chatledger::format::{OutputFormat, write_to_format};
//!
//! let report = LedgerReport::new(Vec::new(), Vec::new(), Utc::now());
//!
//! let format = OutputFormat::from_path("audit.jsonl")?;
//! assert_eq!(format, OutputFormat::Jsonl);
//! write_to_format(&report, "audit.jsonl", format, &OutputConfig::new())?;
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::models::{LedgerReport, OutputConfig};
use crate::error::{LedgerError, Result};

/// Output format for audit reports.
///
/// - [`Csv`](OutputFormat::Csv) - three sheets for spreadsheet review
/// - [`Json`](OutputFormat::Json) - one document with the whole report
/// - [`Jsonl`](OutputFormat::Jsonl) - one record per line
///
/// # Example
///
/// ```rust
/// use chatledger::format::OutputFormat;
/// use std::str::FromStr;
///
/// let format = OutputFormat::from_str("jsonl").unwrap();
/// assert_eq!(format, OutputFormat::Jsonl);
/// assert_eq!(format.extension(), "jsonl");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    /// Semicolon-delimited CSV, written as three sibling files
    #[default]
    Csv,

    /// Pretty-printed JSON document
    Json,

    /// JSON Lines, also known as NDJSON
    Jsonl,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
        }
    }

    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["csv", "json", "jsonl", "ndjson"]
    }

    /// Returns all available formats.
    pub fn all() -> &'static [OutputFormat] {
        &[OutputFormat::Csv, OutputFormat::Json, OutputFormat::Jsonl]
    }

    /// Returns the MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "text/csv",
            OutputFormat::Json => "application/json",
            OutputFormat::Jsonl => "application/x-ndjson",
        }
    }

    /// Detects format from a file path based on extension.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chatledger::format::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::from_path("out.ndjson").unwrap(), OutputFormat::Jsonl);
    /// assert!(OutputFormat::from_path("out.xlsx").is_err());
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let ext = path
            .as_ref()
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            _ => Err(LedgerError::invalid_format(
                "output",
                format!("Unknown file extension: '.{ext}'. Expected one of: csv, json, jsonl"),
            )),
        }
    }

    /// Cargo feature that enables this format's writer.
    fn feature(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv-output",
            OutputFormat::Json | OutputFormat::Jsonl => "json-output",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "CSV"),
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Jsonl => write!(f, "JSONL"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                OutputFormat::all_names().join(", ")
            )),
        }
    }
}

/// Writes the report in the given format. Returns every file written.
///
/// # Errors
///
/// Returns an error if:
/// - The required feature for the format is not enabled
/// - A file cannot be written
#[allow(unused_variables)]
pub fn write_to_format(
    report: &LedgerReport,
    path: impl AsRef<Path>,
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<Vec<PathBuf>> {
    let path = path.as_ref();
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::write_csv(report, path, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => {
            crate::core::output::write_json(report, path, config)?;
            Ok(vec![path.to_path_buf()])
        }
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => {
            crate::core::output::write_jsonl(report, path, config)?;
            Ok(vec![path.to_path_buf()])
        }
        #[allow(unreachable_patterns)]
        _ => Err(LedgerError::invalid_format(
            "output",
            format!(
                "Output format {format} requires the '{}' feature to be enabled",
                format.feature()
            ),
        )),
    }
}
