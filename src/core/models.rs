//! Report data models.
//!
//! A [`LedgerReport`] is the audit export of one upload: every persisted
//! message and issue, aggregate statistics and the fixed list of known
//! limitations. The writers in [`crate::core::output`] render it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::processor::LedgerStats;
use crate::store::{StoredIssue, StoredMessage};

/// Product name printed on every report.
pub const PRODUCT_NAME: &str = "Chat Ledger";

/// Caveats that apply to every reconstruction.
pub const LIMITATIONS: [&str; 5] = [
    "Chat metadata requires manual verification",
    "Timestamps preserved as-is, no timezone normalization",
    "Deleted messages flagged but content not recoverable",
    "Media files not extracted (only placeholders)",
    "Treat this as a parsing aid, not a definitive record",
];

/// Placeholder for a missing sender or timestamp.
pub const UNKNOWN_VALUE: &str = "(unknown)";

/// Placeholder for an issue without a suggested action.
pub const DEFAULT_ACTION: &str = "Review this entry manually.";

/// Placeholder for a message without a confidence reason.
pub const NO_ASSESSMENT: &str = "No assessment";

/// Configuration for report output.
/// Controls which optional message fields are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Include the raw source lines of each message (default: true)
    pub include_raw: bool,
    /// Include the normalised timestamp (default: true)
    pub include_normalized: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            include_raw: true,
            include_normalized: true,
        }
    }
}

impl OutputConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only the required columns.
    pub fn minimal() -> Self {
        Self {
            include_raw: false,
            include_normalized: false,
        }
    }

    #[must_use]
    pub fn without_raw(mut self) -> Self {
        self.include_raw = false;
        self
    }

    #[must_use]
    pub fn without_normalized(mut self) -> Self {
        self.include_normalized = false;
        self
    }
}

/// Highlight applied to a message row that needs attention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowFlag {
    NeedsReview,
    Unverifiable,
}

impl RowFlag {
    /// Derives the flag from a confidence reason.
    ///
    /// ```rust
    /// use chatledger::core::models::RowFlag;
    ///
    /// assert_eq!(RowFlag::from_reason("⚠ Needs Review\n..."), Some(RowFlag::NeedsReview));
    /// assert_eq!(RowFlag::from_reason("✓ Verified\n..."), None);
    /// ```
    pub fn from_reason(reason: &str) -> Option<Self> {
        if reason.contains("Needs Review") {
            Some(RowFlag::NeedsReview)
        } else if reason.contains("Unverifiable") {
            Some(RowFlag::Unverifiable)
        } else {
            None
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RowFlag::NeedsReview => "Needs Review",
            RowFlag::Unverifiable => "Unverifiable",
        }
    }
}

/// Headline numbers of a report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_messages: usize,
    pub total_issues: usize,
    pub stats: LedgerStats,
}

/// Audit export of one upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerReport {
    pub product: String,
    pub generated_at: DateTime<Utc>,
    pub messages: Vec<StoredMessage>,
    pub issues: Vec<StoredIssue>,
    pub summary: ReportSummary,
    pub limitations: Vec<String>,
}

impl LedgerReport {
    /// Builds a report, computing the summary from the records.
    pub fn new(
        messages: Vec<StoredMessage>,
        issues: Vec<StoredIssue>,
        generated_at: DateTime<Utc>,
    ) -> Self {
        let stats = LedgerStats::compute(
            messages.iter().map(|m| &m.message),
            issues.iter().map(|i| &i.issue),
        );
        Self {
            product: PRODUCT_NAME.to_string(),
            generated_at,
            summary: ReportSummary {
                total_messages: messages.len(),
                total_issues: issues.len(),
                stats,
            },
            messages,
            issues,
            limitations: LIMITATIONS.iter().map(|l| (*l).to_string()).collect(),
        }
    }

    /// Category/value rows of the overview sheet.
    ///
    /// Section headings have an empty value; blank rows separate sections.
    pub fn overview_rows(&self) -> Vec<(String, String)> {
        let stats = &self.summary.stats;
        let mut rows: Vec<(String, String)> = Vec::new();
        let mut push = |category: &str, value: String| rows.push((category.to_string(), value));

        push("EXPORT SUMMARY", String::new());
        push("Product", self.product.clone());
        push("Export Date", self.generated_at.to_rfc3339());
        push("", String::new());

        push("MESSAGE STATISTICS", String::new());
        push("Total Messages", self.summary.total_messages.to_string());
        push("Total Issues", self.summary.total_issues.to_string());
        push("Multi-line Messages", stats.multiline_messages.to_string());
        push("Unparsed Timestamps", stats.unparsed_timestamps.to_string());
        push(
            "Average Confidence",
            format!("{:.2}", stats.average_confidence),
        );
        push("", String::new());

        push("RELIABILITY", String::new());
        push("Verified", stats.by_reliability.verified.to_string());
        push("Likely", stats.by_reliability.likely.to_string());
        push("Needs Review", stats.by_reliability.needs_review.to_string());
        push("Unverifiable", stats.by_reliability.unverifiable.to_string());
        push("", String::new());

        push("KNOWN LIMITATIONS", String::new());
        for (idx, limitation) in self.limitations.iter().enumerate() {
            rows.push((format!("{}. {limitation}", idx + 1), String::new()));
        }
        rows
    }
}
