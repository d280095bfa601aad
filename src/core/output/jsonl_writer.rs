//! JSON Lines (JSONL) output writer.
//!
//! One record per line: every message, then every issue. Each object
//! carries a `"record"` tag so a consumer can split the stream without
//! inspecting the other fields.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use super::json_writer::{JsonIssue, JsonMessage};
use crate::core::models::{LedgerReport, OutputConfig};
use crate::error::Result;

#[derive(Serialize)]
#[serde(tag = "record", rename_all = "lowercase")]
enum JsonlRecord<'a> {
    Message(JsonMessage<'a>),
    Issue(JsonIssue<'a>),
}

fn records<'a>(
    report: &'a LedgerReport,
    config: &'a OutputConfig,
) -> impl Iterator<Item = JsonlRecord<'a>> {
    let messages = report
        .messages
        .iter()
        .map(|m| JsonlRecord::Message(JsonMessage::from_stored(m, config)));
    let issues = report
        .issues
        .iter()
        .map(|i| JsonlRecord::Issue(JsonIssue::from_stored(i)));
    messages.chain(issues)
}

/// Writes the report in JSONL (JSON Lines) format.
///
/// ```jsonl
/// {"record":"message","id":1,"senderName":"Alice",...}
/// {"record":"issue","id":1,"issueType":"orphaned_line",...}
/// ```
pub fn write_jsonl(
    report: &LedgerReport,
    output_path: impl AsRef<Path>,
    config: &OutputConfig,
) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);

    for record in records(report, config) {
        let line = serde_json::to_string(&record)?;
        writeln!(writer, "{line}")?;
    }

    writer.flush()?;
    Ok(())
}

/// Converts the report to a JSONL string.
pub fn to_jsonl(report: &LedgerReport, config: &OutputConfig) -> Result<String> {
    let mut output = String::new();
    for record in records(report, config) {
        output.push_str(&serde_json::to_string(&record)?);
        output.push('\n');
    }
    Ok(output)
}
