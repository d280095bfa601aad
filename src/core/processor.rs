//! Aggregate statistics over reconstructed messages and issues.

use serde::{Deserialize, Serialize};

use crate::issue::{ParsingIssue, Severity};
use crate::message::{MessageType, ReconstructedMessage, ReliabilityStatus};
use crate::parser::ParseResult;

/// Counts per message type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeCounts {
    pub text: usize,
    pub media: usize,
    pub deleted: usize,
    pub system: usize,
}

impl TypeCounts {
    pub fn get(&self, message_type: MessageType) -> usize {
        match message_type {
            MessageType::Text => self.text,
            MessageType::Media => self.media,
            MessageType::Deleted => self.deleted,
            MessageType::System => self.system,
        }
    }

    fn bump(&mut self, message_type: MessageType) {
        match message_type {
            MessageType::Text => self.text += 1,
            MessageType::Media => self.media += 1,
            MessageType::Deleted => self.deleted += 1,
            MessageType::System => self.system += 1,
        }
    }
}

/// Counts per reliability category named in the reasons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReliabilityCounts {
    pub verified: usize,
    pub likely: usize,
    pub needs_review: usize,
    pub unverifiable: usize,
    /// Reasons naming no known category.
    pub unassessed: usize,
}

impl ReliabilityCounts {
    pub fn get(&self, status: ReliabilityStatus) -> usize {
        match status {
            ReliabilityStatus::Verified => self.verified,
            ReliabilityStatus::Likely => self.likely,
            ReliabilityStatus::NeedsReview => self.needs_review,
            ReliabilityStatus::Unverifiable => self.unverifiable,
        }
    }

    fn bump(&mut self, status: Option<ReliabilityStatus>) {
        match status {
            Some(ReliabilityStatus::Verified) => self.verified += 1,
            Some(ReliabilityStatus::Likely) => self.likely += 1,
            Some(ReliabilityStatus::NeedsReview) => self.needs_review += 1,
            Some(ReliabilityStatus::Unverifiable) => self.unverifiable += 1,
            None => self.unassessed += 1,
        }
    }
}

/// Counts per issue severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub critical: usize,
    pub warning: usize,
    pub info: usize,
}

impl SeverityCounts {
    pub fn get(&self, severity: Severity) -> usize {
        match severity {
            Severity::Critical => self.critical,
            Severity::Warning => self.warning,
            Severity::Info => self.info,
        }
    }
}

/// Statistics about one upload's reconstruction.
///
/// # Example
///
/// ```rust
/// use chatledger::core::LedgerStats;
/// use chatledger::message::UploadId;
/// use chatledger::parser::parse_chat;
///
/// let result = parse_chat("header\n1/2/23, 10:00 - Bob: a\nb", UploadId::new(1));
/// let stats = LedgerStats::from_result(&result);
/// assert_eq!(stats.total_messages, 1);
/// assert_eq!(stats.total_issues, 1);
/// assert_eq!(stats.multiline_messages, 1);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerStats {
    pub total_messages: usize,
    pub total_issues: usize,
    pub multiline_messages: usize,
    /// Messages whose timestamp could not be normalised.
    pub unparsed_timestamps: usize,
    pub average_confidence: f64,
    pub by_type: TypeCounts,
    pub by_reliability: ReliabilityCounts,
    pub by_severity: SeverityCounts,
}

impl LedgerStats {
    /// Computes statistics from messages and issues.
    pub fn compute<'a, M, I>(messages: M, issues: I) -> Self
    where
        M: IntoIterator<Item = &'a ReconstructedMessage>,
        I: IntoIterator<Item = &'a ParsingIssue>,
    {
        let mut stats = Self::default();
        let mut confidence_sum = 0.0;

        for msg in messages {
            stats.total_messages += 1;
            confidence_sum += msg.confidence_score;
            if msg.is_multiline() {
                stats.multiline_messages += 1;
            }
            if msg.timestamp_normalized.is_none() {
                stats.unparsed_timestamps += 1;
            }
            stats.by_type.bump(msg.message_type);
            stats.by_reliability.bump(msg.reliability());
        }

        for issue in issues {
            stats.total_issues += 1;
            match issue.severity {
                Severity::Critical => stats.by_severity.critical += 1,
                Severity::Warning => stats.by_severity.warning += 1,
                Severity::Info => stats.by_severity.info += 1,
            }
        }

        if stats.total_messages > 0 {
            stats.average_confidence = confidence_sum / stats.total_messages as f64;
        }
        stats
    }

    /// Computes statistics for a parse result.
    pub fn from_result(result: &ParseResult) -> Self {
        Self::compute(&result.messages, &result.issues)
    }

    /// Share of messages that carry a normalised timestamp, in percent.
    pub fn timestamp_coverage(&self) -> f64 {
        if self.total_messages == 0 {
            return 0.0;
        }
        (1.0 - self.unparsed_timestamps as f64 / self.total_messages as f64) * 100.0
    }

    /// Returns `true` if anything was recorded as an issue.
    pub fn has_issues(&self) -> bool {
        self.total_issues > 0
    }
}
