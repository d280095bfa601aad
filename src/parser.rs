//! Chat log reconstruction engine.
//!
//! [`ChatLogParser`] turns the full text of a WhatsApp-style export into two
//! ordered streams: reconstructed messages and parsing issues. It walks the
//! document once, line by line, holding at most one open message:
//!
//! | Line | Open message | Effect |
//! |------|--------------|--------|
//! | blank | any | skipped |
//! | message start | any | previous message emitted, new one opened |
//! | other | yes | appended to the open message |
//! | other | no | recorded as an `orphaned_line` issue |
//!
//! Every non-blank line ends up in exactly one message or exactly one issue.
//! Parsing is deterministic and never fails on malformed text; only
//! undecodable bytes are rejected, and then for the whole document.
//!
//! # Example
//!
//! ```rust
//! use chatledger::message::UploadId;
//! use chatledger::parser::ChatLogParser;
//!
//! let parser = ChatLogParser::new();
//! let result = parser.parse_str("hello\n01/02/23, 10:00 - Alice: hi", UploadId::new(1));
//!
//! assert_eq!(result.messages.len(), 1);
//! assert_eq!(result.issues.len(), 1);
//! assert_eq!(result.issues[0].raw_message.as_deref(), Some("hello"));
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::ParserConfig;
use crate::error::{LedgerError, Result};
use crate::issue::ParsingIssue;
use crate::message::{MessageType, ReconstructedMessage, UploadId};
use crate::parsing::{
    LineMatch, classify_line, detect_content_type, downgrade_for_continuation,
    initial_assessment, normalize_timestamp,
};

/// Output of one parse: messages and issues, both in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseResult {
    pub messages: Vec<ReconstructedMessage>,
    pub issues: Vec<ParsingIssue>,
}

impl ParseResult {
    /// Returns `true` if neither messages nor issues were produced.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.issues.is_empty()
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    pub fn issue_count(&self) -> usize {
        self.issues.len()
    }
}

/// Reconstructs messages from chat export text.
///
/// The parser holds only configuration; each call is independent, so one
/// parser can serve many uploads, including from several threads.
#[derive(Debug, Clone, Default)]
pub struct ChatLogParser {
    config: ParserConfig,
}

impl ChatLogParser {
    /// Creates a parser with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parses decoded text.
    ///
    /// Never fails: lines that fit nowhere become issues.
    pub fn parse_str(&self, content: &str, upload_id: UploadId) -> ParseResult {
        let result = content
            .lines()
            .enumerate()
            .fold(
                Accumulator::new(&self.config, upload_id),
                |mut acc, (index, line)| {
                    acc.push_line(index + 1, line);
                    acc
                },
            )
            .finish();

        tracing::debug!(
            upload_id = %upload_id,
            messages = result.messages.len(),
            issues = result.issues.len(),
            "chat log reconstructed"
        );

        result
    }

    /// Parses raw bytes, which must be UTF-8 (a leading BOM is allowed).
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Utf8`] if the bytes are not valid UTF-8.
    pub fn parse_bytes(&self, bytes: &[u8], upload_id: UploadId) -> Result<ParseResult> {
        let content = decode_text(bytes, &format!("upload {upload_id}"))?;
        Ok(self.parse_str(content, upload_id))
    }

    /// Reads and parses a file.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Read`] if the file cannot be read and
    /// [`LedgerError::Utf8`] if it is not UTF-8 text.
    pub fn parse(&self, path: &Path, upload_id: UploadId) -> Result<ParseResult> {
        let bytes = fs::read(path).map_err(|e| LedgerError::read(path, e))?;
        let content = decode_text(&bytes, &path.display().to_string())?;
        Ok(self.parse_str(content, upload_id))
    }
}

/// Parses text with the default configuration.
pub fn parse_chat(content: &str, upload_id: UploadId) -> ParseResult {
    ChatLogParser::new().parse_str(content, upload_id)
}

/// Decodes export bytes as UTF-8, dropping a leading byte-order mark.
pub fn decode_text<'a>(bytes: &'a [u8], context: &str) -> Result<&'a str> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    std::str::from_utf8(bytes).map_err(|e| LedgerError::utf8(context, e))
}

/// Trims whitespace and stray byte-order marks.
fn trim_line(line: &str) -> &str {
    line.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// Single-slot accumulator threaded through the line fold.
struct Accumulator<'c> {
    config: &'c ParserConfig,
    upload_id: UploadId,
    open: Option<ReconstructedMessage>,
    messages: Vec<ReconstructedMessage>,
    issues: Vec<ParsingIssue>,
}

impl<'c> Accumulator<'c> {
    fn new(config: &'c ParserConfig, upload_id: UploadId) -> Self {
        Self {
            config,
            upload_id,
            open: None,
            messages: Vec::new(),
            issues: Vec::new(),
        }
    }

    fn push_line(&mut self, line_number: usize, raw: &str) {
        let line = trim_line(raw);
        if line.is_empty() {
            return;
        }

        if let Some(start) = classify_line(line) {
            let message = self.open_message(start, line);
            if let Some(closed) = self.open.replace(message) {
                self.messages.push(closed);
            }
        } else if let Some(open) = self.open.as_mut() {
            open.append_line(line);
            if downgrade_for_continuation(open) {
                tracing::trace!(line_number, "verified message downgraded: spans multiple lines");
            }
        } else {
            tracing::debug!(
                upload_id = %self.upload_id,
                line_number,
                "orphaned line before first message"
            );
            self.issues
                .push(ParsingIssue::orphaned_line(self.upload_id, line, line_number));
        }
    }

    fn open_message(&self, start: LineMatch<'_>, line: &str) -> ReconstructedMessage {
        let assessment = initial_assessment(start.dialect);

        // Type is fixed here, from the opening line; continuations never re-type.
        let (sender, message_type) = match start.sender {
            Some(sender) => (sender.to_string(), detect_content_type(start.text)),
            None => (self.config.system_sender.clone(), MessageType::System),
        };

        ReconstructedMessage {
            upload_id: self.upload_id,
            chat_name: self.config.chat_name.clone(),
            sender_name: Some(sender),
            timestamp_original: start.timestamp.to_string(),
            timestamp_normalized: normalize_timestamp(start.timestamp),
            content: start.text.to_string(),
            message_type,
            is_edited: false,
            confidence_score: assessment.score,
            confidence_reason: assessment.reason(),
            raw_message: line.to_string(),
        }
    }

    fn finish(mut self) -> ParseResult {
        if let Some(last) = self.open.take() {
            self.messages.push(last);
        }
        ParseResult {
            messages: self.messages,
            issues: self.issues,
        }
    }
}
