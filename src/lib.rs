//! # Chatledger
//!
//! A Rust library for rebuilding an auditable message ledger from
//! WhatsApp-style plain-text chat exports.
//!
//! ## Overview
//!
//! Exports are loosely formatted: a message starts with a timestamp line in
//! one of several dialects and may continue over any number of following
//! lines. Chatledger walks the export once and produces:
//!
//! - **Reconstructed messages** with sender, original and normalised
//!   timestamp, content type, raw source lines and a confidence score with a
//!   human-readable reason
//! - **Parsing issues** for every line that could not be attributed to a
//!   message
//!
//! Every non-blank input line lands in exactly one of the two, so nothing is
//! silently dropped.
//!
//! ## Quick Start
//!
//! ```rust
//! use chatledger::prelude::*;
//!
//! let export = "\
//! Messages are end-to-end encrypted.
//! [1/15/24, 10:30:45 AM] Alice: Are we still on for tonight?
//! 1/15/24, 10:31 - Bob: Yes!
//! See you at 8
//! 1/15/24, 10:32 - Bob: <Media omitted>";
//!
//! let result = parse_chat(export, UploadId::new(1));
//!
//! assert_eq!(result.messages.len(), 3);
//! assert_eq!(result.issues.len(), 1);
//! assert_eq!(result.messages[1].content, "Yes!\nSee you at 8");
//! assert_eq!(result.messages[2].message_type, MessageType::Media);
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] - [`ChatLogParser`], the reconstruction engine
//! - [`parsing`] - line dialects, confidence, content type, timestamps
//! - [`message`] - [`ReconstructedMessage`] and its vocabulary
//! - [`issue`] - [`ParsingIssue`]
//! - [`config`] - [`ParserConfig`](config::ParserConfig)
//! - [`store`] - [`LedgerStore`](store::LedgerStore) and the in-memory store
//! - [`ingest`] - upload lifecycle and report export
//! - [`core`] - report model, statistics and writers (CSV, JSON, JSONL)
//! - [`format`] - [`OutputFormat`](format::OutputFormat)
//! - [`error`] - [`LedgerError`], [`Result`]
//! - [`prelude`] - Convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod ingest;
pub mod issue;
pub mod message;
pub mod parser;
pub mod parsing;
pub mod store;

// Re-export the main types at the crate root for convenience
pub use error::{LedgerError, Result};
pub use issue::ParsingIssue;
pub use message::ReconstructedMessage;
pub use parser::{ChatLogParser, ParseResult, parse_chat};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatledger::prelude::*;
/// ```
pub mod prelude {
    // Engine
    pub use crate::parser::{ChatLogParser, ParseResult, parse_chat};

    // Records
    pub use crate::issue::{IssueType, ParsingIssue, Severity};
    pub use crate::message::{
        ConfidenceBand, MessageType, ReconstructedMessage, ReliabilityStatus, UploadId,
    };

    // Error types
    pub use crate::error::{LedgerError, Result};

    // Configuration
    pub use crate::config::ParserConfig;
    pub use crate::core::models::OutputConfig;

    // Persistence and lifecycle
    pub use crate::ingest::{export_report, ingest_upload};
    pub use crate::store::{LedgerStore, MemoryStore, Page, UploadStatus};

    // Reporting
    pub use crate::core::{LedgerReport, LedgerStats};
    pub use crate::format::{OutputFormat, write_to_format};
}
