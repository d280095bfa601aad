//! CSV output writer.
//!
//! A report becomes three semicolon-delimited sheets: messages, issues and
//! an overview. On disk they are written side by side as
//! `<stem>_messages.csv`, `<stem>_issues.csv` and `<stem>_overview.csv`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::models::{
    DEFAULT_ACTION, LedgerReport, NO_ASSESSMENT, OutputConfig, RowFlag, UNKNOWN_VALUE,
};
use crate::error::{LedgerError, Result};
use crate::store::{StoredIssue, StoredMessage};

/// The three rendered sheets of a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvSheets {
    pub messages: String,
    pub issues: String,
    pub overview: String,
}

impl CsvSheets {
    /// Sheet names paired with their content, in writing order.
    pub fn named(&self) -> [(&'static str, &str); 3] {
        [
            ("messages", self.messages.as_str()),
            ("issues", self.issues.as_str()),
            ("overview", self.overview.as_str()),
        ]
    }
}

/// Writes the report as three CSV files next to `output_path`.
///
/// `report.csv` produces `report_messages.csv`, `report_issues.csv` and
/// `report_overview.csv`. Returns the paths written.
pub fn write_csv(
    report: &LedgerReport,
    output_path: impl AsRef<Path>,
    config: &OutputConfig,
) -> Result<Vec<PathBuf>> {
    let output_path = output_path.as_ref();
    let sheets = to_csv(report, config)?;

    let mut written = Vec::with_capacity(3);
    for (name, content) in sheets.named() {
        let path = sheet_path(output_path, name);
        fs::write(&path, content)?;
        written.push(path);
    }
    Ok(written)
}

/// Renders the report as three CSV strings.
pub fn to_csv(report: &LedgerReport, config: &OutputConfig) -> Result<CsvSheets> {
    Ok(CsvSheets {
        messages: messages_sheet(&report.messages, config)?,
        issues: issues_sheet(&report.issues)?,
        overview: overview_sheet(report)?,
    })
}

/// `dir/report.csv` + `issues` -> `dir/report_issues.csv`.
fn sheet_path(output_path: &Path, sheet: &str) -> PathBuf {
    let stem = output_path
        .file_stem()
        .map_or_else(|| "report".into(), |s| s.to_string_lossy());
    output_path.with_file_name(format!("{stem}_{sheet}.csv"))
}

fn render<F>(fill: F) -> Result<String>
where
    F: FnOnce(&mut csv::Writer<Vec<u8>>) -> Result<()>,
{
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(Vec::new());
    fill(&mut writer)?;
    let bytes = writer
        .into_inner()
        .map_err(|e| LedgerError::from(e.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}

fn messages_sheet(messages: &[StoredMessage], config: &OutputConfig) -> Result<String> {
    render(|writer| {
        writer.write_record(build_message_header(config))?;
        for stored in messages {
            writer.write_record(build_message_record(stored, config))?;
        }
        Ok(())
    })
}

/// Build the messages header based on output configuration.
fn build_message_header(config: &OutputConfig) -> Vec<&'static str> {
    let mut header = vec!["ID", "When"];
    if config.include_normalized {
        header.push("Normalized");
    }
    header.extend(["Who", "Reliability & Why", "What", "Type", "Score", "Flag"]);
    if config.include_raw {
        header.push("Raw Line");
    }
    header
}

fn build_message_record(stored: &StoredMessage, config: &OutputConfig) -> Vec<String> {
    let msg = &stored.message;
    let mut record = vec![stored.id.to_string(), or_unknown(&msg.timestamp_original)];

    if config.include_normalized {
        record.push(
            msg.timestamp_normalized
                .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_default(),
        );
    }

    record.push(msg.sender_name.as_deref().map_or_else(
        || UNKNOWN_VALUE.to_string(),
        or_unknown,
    ));
    record.push(if msg.confidence_reason.is_empty() {
        NO_ASSESSMENT.to_string()
    } else {
        msg.confidence_reason.clone()
    });
    record.push(msg.content.clone());
    record.push(msg.message_type.as_str().to_string());
    record.push(format!("{:.2}", msg.confidence_score));
    record.push(
        RowFlag::from_reason(&msg.confidence_reason)
            .map(|flag| flag.label().to_string())
            .unwrap_or_default(),
    );

    if config.include_raw {
        record.push(msg.raw_message.clone());
    }
    record
}

fn issues_sheet(issues: &[StoredIssue]) -> Result<String> {
    render(|writer| {
        writer.write_record([
            "Issue ID",
            "Severity",
            "Type",
            "Line",
            "What Happened",
            "What To Do",
            "Raw Line",
        ])?;
        for stored in issues {
            let issue = &stored.issue;
            writer.write_record([
                stored.id.to_string(),
                issue.severity.as_str().to_uppercase(),
                issue.issue_type.as_str().to_string(),
                issue.line_number.map(|n| n.to_string()).unwrap_or_default(),
                issue.description.clone(),
                issue
                    .suggested_action
                    .clone()
                    .unwrap_or_else(|| DEFAULT_ACTION.to_string()),
                issue.raw_message.clone().unwrap_or_default(),
            ])?;
        }
        Ok(())
    })
}

fn overview_sheet(report: &LedgerReport) -> Result<String> {
    render(|writer| {
        writer.write_record(["Category", "Value"])?;
        for (category, value) in report.overview_rows() {
            writer.write_record([category, value])?;
        }
        Ok(())
    })
}

fn or_unknown(value: &str) -> String {
    if value.is_empty() {
        UNKNOWN_VALUE.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::TempDir;

    use crate::issue::ParsingIssue;
    use crate::message::{ReconstructedMessage, UploadId};
    use crate::parsing::normalize_timestamp;

    fn report() -> LedgerReport {
        let upload = UploadId::new(1);
        let mut message = ReconstructedMessage::new(upload, "Alice", "1/2/23, 10:00", "hi; there");
        message.raw_message = "1/2/23, 10:00 - Alice: hi; there".to_string();
        message.timestamp_normalized = normalize_timestamp("1/2/23, 10:00");
        let mut unnamed = ReconstructedMessage::new(upload, "", "", "who?");
        unnamed.sender_name = None;
        unnamed.confidence_reason = "⚠ Needs Review\nAmbiguous".to_string();

        let issue = ParsingIssue::orphaned_line(upload, "header", 1);
        let mut bare = ParsingIssue::orphaned_line(upload, "junk", 2);
        bare.suggested_action = None;

        LedgerReport::new(
            vec![
                StoredMessage { id: 1, message },
                StoredMessage { id: 2, message: unnamed },
            ],
            vec![
                StoredIssue { id: 1, issue },
                StoredIssue { id: 2, issue: bare },
            ],
            Utc::now(),
        )
    }

    fn rows(sheet: &str) -> Vec<Vec<String>> {
        csv::ReaderBuilder::new()
            .delimiter(b';')
            .from_reader(sheet.as_bytes())
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect()
    }

    #[test]
    fn test_messages_sheet_columns() {
        let sheets = to_csv(&report(), &OutputConfig::new()).unwrap();
        let header = sheets.messages.lines().next().unwrap();
        assert_eq!(
            header,
            "ID;When;Normalized;Who;Reliability & Why;What;Type;Score;Flag;Raw Line"
        );

        let rows = rows(&sheets.messages);
        assert_eq!(rows[0][3], "Alice");
        assert_eq!(rows[0][5], "hi; there");
        assert_eq!(rows[0][7], "1.00");
        assert_eq!(rows[0][8], "");
        assert_eq!(rows[0][2], "2023-01-02 10:00:00");
    }

    #[test]
    fn test_missing_values_render_unknown() {
        let sheets = to_csv(&report(), &OutputConfig::minimal()).unwrap();
        let rows = rows(&sheets.messages);
        assert_eq!(rows[1].len(), 8);
        assert_eq!(rows[1][1], "(unknown)");
        assert_eq!(rows[1][2], "(unknown)");
        assert_eq!(rows[1][7], "Needs Review");
    }

    #[test]
    fn test_issues_sheet() {
        let sheets = to_csv(&report(), &OutputConfig::new()).unwrap();
        let rows = rows(&sheets.issues);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][1], "WARNING");
        assert_eq!(rows[0][2], "orphaned_line");
        assert_eq!(rows[0][3], "1");
        assert_eq!(rows[1][5], "Review this entry manually.");
        assert_eq!(rows[1][6], "junk");
    }

    #[test]
    fn test_write_csv_creates_three_files() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("audit.csv");

        let written = write_csv(&report(), &target, &OutputConfig::new()).unwrap();

        let names: Vec<_> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            ["audit_messages.csv", "audit_issues.csv", "audit_overview.csv"]
        );
        let overview = fs::read_to_string(&written[2]).unwrap();
        assert!(overview.contains("KNOWN LIMITATIONS"));
        assert!(overview.contains("Product;Chat Ledger"));
    }
}
