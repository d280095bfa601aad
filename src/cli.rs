//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure
//! - [`OutputFormat`] - Output format options, convertible to
//!   [`crate::format::OutputFormat`]

use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::ParserConfig;
use crate::core::models::OutputConfig;
use crate::ingest::report_file_name;
use crate::store::Upload;

/// Reconstruct messages from a WhatsApp-style chat export and write an
/// audit report that flags every line that could not be attributed.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatledger")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatledger chat.txt
    chatledger chat.txt -o audit.json -f json
    chatledger chat.txt --chat-name \"Family\" --no-raw
    chatledger chat.txt --strict -vv")]
pub struct Args {
    /// Path to the chat export (UTF-8 text)
    pub input: PathBuf,

    /// Path to output file [default: ChatLedger-Audit-<input stem>.<format>]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: OutputFormat,

    /// Chat name recorded on every message
    #[arg(long, value_name = "NAME")]
    pub chat_name: Option<String>,

    /// Sender label for system lines
    #[arg(long, value_name = "NAME")]
    pub system_sender: Option<String>,

    /// Leave the raw source lines out of the report
    #[arg(long)]
    pub no_raw: bool,

    /// Leave normalised timestamps out of the report
    #[arg(long)]
    pub no_normalized: bool,

    /// Exit with status 2 if any parsing issue was recorded
    #[arg(long)]
    pub strict: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Parser configuration from the flags.
    pub fn parser_config(&self) -> ParserConfig {
        let mut config = ParserConfig::new();
        if let Some(name) = &self.chat_name {
            config = config.with_chat_name(name.clone());
        }
        if let Some(sender) = &self.system_sender {
            config = config.with_system_sender(sender.clone());
        }
        config
    }

    /// Report configuration from the flags.
    pub fn output_config(&self) -> OutputConfig {
        let mut config = OutputConfig::new();
        if self.no_raw {
            config = config.without_raw();
        }
        if self.no_normalized {
            config = config.without_normalized();
        }
        config
    }

    /// Default log filter for the verbosity level.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }

    /// Where to write the report: `--output`, or the upload's report name
    /// with the format's extension.
    pub fn output_path(&self, upload: &Upload) -> PathBuf {
        match &self.output {
            Some(path) => path.clone(),
            None => {
                let name = report_file_name(upload);
                Path::new(&name).with_extension(self.format.extension())
            }
        }
    }
}

/// Output format options.
///
/// ```rust
/// use chatledger::cli::OutputFormat;
///
/// let format = OutputFormat::Jsonl;
/// assert_eq!(format.extension(), "jsonl");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Three semicolon-delimited CSV sheets (default)
    #[default]
    Csv,

    /// One JSON document
    Json,

    /// JSON Lines - one record per line
    #[value(alias = "ndjson")]
    Jsonl,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        crate::format::OutputFormat::from(*self).extension()
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&crate::format::OutputFormat::from(*self), f)
    }
}

// Conversion to library format type
impl From<OutputFormat> for crate::format::OutputFormat {
    fn from(format: OutputFormat) -> crate::format::OutputFormat {
        match format {
            OutputFormat::Csv => crate::format::OutputFormat::Csv,
            OutputFormat::Json => crate::format::OutputFormat::Json,
            OutputFormat::Jsonl => crate::format::OutputFormat::Jsonl,
        }
    }
}
