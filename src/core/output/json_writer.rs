//! JSON output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::models::{LedgerReport, OutputConfig, ReportSummary, RowFlag};
use crate::error::Result;
use crate::issue::ParsingIssue;
use crate::message::{MessageType, UploadId};
use crate::store::{StoredIssue, StoredMessage};

/// Message record for JSON output.
/// Optional fields follow `OutputConfig`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct JsonMessage<'a> {
    id: u64,
    upload_id: UploadId,
    chat_name: &'a str,
    sender_name: Option<&'a str>,
    timestamp_original: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp_normalized: Option<String>,
    content: &'a str,
    message_type: MessageType,
    is_edited: bool,
    confidence_score: f64,
    confidence_reason: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    flag: Option<RowFlag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    raw_message: Option<&'a str>,
}

impl<'a> JsonMessage<'a> {
    pub(super) fn from_stored(stored: &'a StoredMessage, config: &OutputConfig) -> Self {
        let msg = &stored.message;
        Self {
            id: stored.id,
            upload_id: msg.upload_id,
            chat_name: &msg.chat_name,
            sender_name: msg.sender_name.as_deref(),
            timestamp_original: &msg.timestamp_original,
            timestamp_normalized: if config.include_normalized {
                msg.timestamp_normalized
                    .map(|ts| ts.format("%Y-%m-%dT%H:%M:%SZ").to_string())
            } else {
                None
            },
            content: &msg.content,
            message_type: msg.message_type,
            is_edited: msg.is_edited,
            confidence_score: msg.confidence_score,
            confidence_reason: &msg.confidence_reason,
            flag: RowFlag::from_reason(&msg.confidence_reason),
            raw_message: config.include_raw.then_some(msg.raw_message.as_str()),
        }
    }
}

/// Issue record for JSON output.
#[derive(Serialize)]
pub(super) struct JsonIssue<'a> {
    id: u64,
    #[serde(flatten)]
    issue: &'a ParsingIssue,
}

impl<'a> JsonIssue<'a> {
    pub(super) fn from_stored(stored: &'a StoredIssue) -> Self {
        Self {
            id: stored.id,
            issue: &stored.issue,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    product: &'a str,
    generated_at: DateTime<Utc>,
    summary: &'a ReportSummary,
    messages: Vec<JsonMessage<'a>>,
    issues: Vec<JsonIssue<'a>>,
    limitations: &'a [String],
}

/// Writes the report to a JSON file.
///
/// # Format
/// ```json
/// {
///   "product": "Chat Ledger",
///   "generatedAt": "2024-06-15T12:30:00Z",
///   "summary": { "totalMessages": 1, "totalIssues": 0, "stats": { ... } },
///   "messages": [ { "id": 1, "senderName": "Alice", ... } ],
///   "issues": [],
///   "limitations": [ ... ]
/// }
/// ```
pub fn write_json(
    report: &LedgerReport,
    output_path: impl AsRef<Path>,
    config: &OutputConfig,
) -> Result<()> {
    let json = to_json(report, config)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts the report to a pretty-printed JSON string.
pub fn to_json(report: &LedgerReport, config: &OutputConfig) -> Result<String> {
    let json_report = JsonReport {
        product: &report.product,
        generated_at: report.generated_at,
        summary: &report.summary,
        messages: report
            .messages
            .iter()
            .map(|m| JsonMessage::from_stored(m, config))
            .collect(),
        issues: report.issues.iter().map(JsonIssue::from_stored).collect(),
        limitations: &report.limitations,
    };

    Ok(serde_json::to_string_pretty(&json_report)?)
}
