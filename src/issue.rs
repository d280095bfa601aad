//! Parsing issues recorded alongside reconstructed messages.
//!
//! An issue is produced whenever input does not fit the reconstruction rules
//! but processing can continue. Issues never abort a parse.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::message::UploadId;

/// Category of a parsing issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum IssueType {
    /// A line that opens no message and arrives while no message is open.
    OrphanedLine,
}

impl IssueType {
    /// Storage name (`orphaned_line`).
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueType::OrphanedLine => "orphaned_line",
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How urgent an issue is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::Warning => "Warning",
            Severity::Info => "Info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "critical" => Ok(Severity::Critical),
            "warning" => Ok(Severity::Warning),
            "info" => Ok(Severity::Info),
            _ => Err(format!(
                "Unknown severity: '{s}'. Expected one of: critical, warning, info"
            )),
        }
    }
}

/// A structured anomaly found while reconstructing messages.
///
/// Issues are immutable once created and keep input line order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsingIssue {
    pub upload_id: UploadId,

    pub issue_type: IssueType,

    pub severity: Severity,

    /// What happened.
    pub description: String,

    /// What the reader should do about it.
    #[serde(default)]
    pub suggested_action: Option<String>,

    /// The offending line, if the issue is tied to one.
    #[serde(default)]
    pub raw_message: Option<String>,

    /// Stored message this issue refers to. Orphans never have one.
    #[serde(default)]
    pub message_id: Option<u64>,

    /// 1-based line number in the input, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub line_number: Option<usize>,
}

impl ParsingIssue {
    /// Builds the issue for a line that arrives before any message start.
    ///
    /// ```
    /// use chatledger::issue::{IssueType, ParsingIssue, Severity};
    /// use chatledger::message::UploadId;
    ///
    /// let issue = ParsingIssue::orphaned_line(UploadId::new(1), "hello", 1);
    /// assert_eq!(issue.issue_type, IssueType::OrphanedLine);
    /// assert_eq!(issue.severity, Severity::Warning);
    /// assert!(issue.message_id.is_none());
    /// ```
    pub fn orphaned_line(upload_id: UploadId, line: &str, line_number: usize) -> Self {
        Self {
            upload_id,
            issue_type: IssueType::OrphanedLine,
            severity: Severity::Warning,
            description: "Orphaned line found before any message start. \
                          Possible file header or corrupted entry."
                .to_string(),
            suggested_action: Some(
                "Review the raw input. If it's metadata, you can safely ignore it.".to_string(),
            ),
            raw_message: Some(line.to_string()),
            message_id: None,
            line_number: Some(line_number),
        }
    }
}
