//! Reconstructed message records.
//!
//! This module provides [`ReconstructedMessage`], the record the engine builds
//! for every message it recognises in a chat export, together with the small
//! vocabularies that describe it:
//!
//! - [`UploadId`] - opaque identifier of the upload a parse belongs to
//! - [`MessageType`] - text, media placeholder, deletion marker or system line
//! - [`ReliabilityStatus`] - the reliability categories used in reasons
//! - [`ConfidenceBand`] - coarse presentation bucket for a score
//!
//! # Examples
//!
//! ```
//! use chatledger::message::{MessageType, ReconstructedMessage, UploadId};
//!
//! let msg = ReconstructedMessage::new(UploadId::new(7), "Alice", "1/15/24, 10:30 AM", "Hello!");
//! assert_eq!(msg.sender_name.as_deref(), Some("Alice"));
//! assert_eq!(msg.message_type, MessageType::Text);
//! assert!(!msg.is_multiline());
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Chat name stored on every message; the engine does not resolve chat identity.
pub const UNKNOWN_CHAT: &str = "Unknown";

/// Sender label synthesized for system lines.
pub const SYSTEM_SENDER: &str = "System";

/// Opaque identifier of one upload (one ingested file).
///
/// Supplied by the caller and copied onto every message and issue produced
/// by a single parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UploadId(pub u64);

impl UploadId {
    /// Wraps a raw identifier.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for UploadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for UploadId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Kind of content carried by a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    /// Ordinary text.
    #[default]
    Text,
    /// A media-omitted placeholder; the payload itself is not in the export.
    Media,
    /// A deleted-message marker; the original content is not recoverable.
    Deleted,
    /// A system line (group events, encryption notices, ...).
    System,
}

impl MessageType {
    /// Returns the lowercase name used in storage and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::Text => "text",
            MessageType::Media => "media",
            MessageType::Deleted => "deleted",
            MessageType::System => "system",
        }
    }

    /// Returns all message types.
    pub fn all() -> &'static [MessageType] {
        &[
            MessageType::Text,
            MessageType::Media,
            MessageType::Deleted,
            MessageType::System,
        ]
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MessageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(MessageType::Text),
            "media" => Ok(MessageType::Media),
            "deleted" => Ok(MessageType::Deleted),
            "system" => Ok(MessageType::System),
            _ => Err(format!("Unknown message type: '{s}'")),
        }
    }
}

/// Reliability categories a confidence reason can express.
///
/// The reason text of a message starts with the category's glyph and label,
/// e.g. `"✓ Verified"`. Downstream renderers key row highlighting off the
/// labels, so they are part of the data contract.
///
/// The parser currently emits only [`Verified`](ReliabilityStatus::Verified)
/// and [`Likely`](ReliabilityStatus::Likely).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReliabilityStatus {
    /// Matched a standard format with no ambiguity.
    Verified,
    /// Recognised, with a caveat (auto-filled sender, multi-line span).
    Likely,
    /// Should be checked by a person.
    NeedsReview,
    /// Cannot be verified from the export alone.
    Unverifiable,
}

impl ReliabilityStatus {
    /// Human-readable label embedded in reasons.
    pub fn label(&self) -> &'static str {
        match self {
            ReliabilityStatus::Verified => "Verified",
            ReliabilityStatus::Likely => "Likely Accurate",
            ReliabilityStatus::NeedsReview => "Needs Review",
            ReliabilityStatus::Unverifiable => "Unverifiable",
        }
    }

    /// Glyph shown in front of the label.
    pub fn glyph(&self) -> &'static str {
        match self {
            ReliabilityStatus::Verified => "✓",
            ReliabilityStatus::Likely => "◐",
            ReliabilityStatus::NeedsReview => "⚠",
            ReliabilityStatus::Unverifiable => "✗",
        }
    }

    /// Returns the storage name (`verified`, `likely`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            ReliabilityStatus::Verified => "verified",
            ReliabilityStatus::Likely => "likely",
            ReliabilityStatus::NeedsReview => "needs_review",
            ReliabilityStatus::Unverifiable => "unverifiable",
        }
    }

    /// Returns all categories, most trusted first.
    pub fn all() -> &'static [ReliabilityStatus] {
        &[
            ReliabilityStatus::Verified,
            ReliabilityStatus::Likely,
            ReliabilityStatus::NeedsReview,
            ReliabilityStatus::Unverifiable,
        ]
    }

    /// Finds the category whose label appears in a reason text.
    ///
    /// ```
    /// use chatledger::message::ReliabilityStatus;
    ///
    /// let reason = "◐ Likely Accurate\nSystem message format recognized, but sender auto-filled.";
    /// assert_eq!(ReliabilityStatus::from_reason(reason), Some(ReliabilityStatus::Likely));
    /// assert_eq!(ReliabilityStatus::from_reason("no idea"), None);
    /// ```
    pub fn from_reason(reason: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|status| reason.contains(status.label()))
    }
}

impl fmt::Display for ReliabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Coarse presentation bucket for a confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceBand {
    /// Score of at least 0.9.
    Trusted,
    /// Score of at least 0.6.
    Review,
    /// Anything lower.
    Flagged,
}

impl ConfidenceBand {
    /// Buckets a score.
    ///
    /// ```
    /// use chatledger::message::ConfidenceBand;
    ///
    /// assert_eq!(ConfidenceBand::from_score(0.95), ConfidenceBand::Trusted);
    /// assert_eq!(ConfidenceBand::from_score(0.7), ConfidenceBand::Review);
    /// assert_eq!(ConfidenceBand::from_score(0.2), ConfidenceBand::Flagged);
    /// ```
    pub fn from_score(score: f64) -> Self {
        if score < 0.6 {
            ConfidenceBand::Flagged
        } else if score < 0.9 {
            ConfidenceBand::Review
        } else {
            ConfidenceBand::Trusted
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            ConfidenceBand::Trusted => "Trusted",
            ConfidenceBand::Review => "Review",
            ConfidenceBand::Flagged => "Flagged",
        }
    }
}

impl fmt::Display for ConfidenceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A message rebuilt from one or more lines of a chat export.
///
/// Identity is assigned later by a store; until then a message is identified
/// only by its position in the parse output.
///
/// `content` and `raw_message` grow together: every continuation line is
/// appended to both with a `'\n'` separator and nothing else rewrites them.
/// `confidence_score` and `confidence_reason` always change as a pair.
///
/// # Serialization
///
/// Field names are camelCase on the wire, matching the ledger schema
/// (`uploadId`, `timestampOriginal`, ...). `timestampNormalized` is omitted
/// when the timestamp could not be parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconstructedMessage {
    /// Upload this message was parsed from.
    pub upload_id: UploadId,

    /// Chat name; always [`UNKNOWN_CHAT`] unless configured otherwise.
    pub chat_name: String,

    /// Sender display name. System lines carry [`SYSTEM_SENDER`].
    #[serde(default)]
    pub sender_name: Option<String>,

    /// Timestamp exactly as it appeared in the export.
    pub timestamp_original: String,

    /// Best-effort absolute timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub timestamp_normalized: Option<DateTime<Utc>>,

    /// Message text, continuation lines joined with `'\n'`.
    pub content: String,

    /// Content classification.
    pub message_type: MessageType,

    /// Reserved; edit detection is not implemented.
    #[serde(default)]
    pub is_edited: bool,

    /// Reliability in `[0, 1]`.
    pub confidence_score: f64,

    /// Reason paired with the score.
    pub confidence_reason: String,

    /// Verbatim source line(s).
    pub raw_message: String,
}

impl ReconstructedMessage {
    /// Creates a single-line text message with a verified confidence.
    ///
    /// Mostly useful for tests and for building fixtures; the parser fills
    /// every field itself.
    pub fn new(
        upload_id: UploadId,
        sender: impl Into<String>,
        timestamp: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let content = content.into();
        Self {
            upload_id,
            chat_name: UNKNOWN_CHAT.to_string(),
            sender_name: Some(sender.into()),
            timestamp_original: timestamp.into(),
            timestamp_normalized: None,
            raw_message: content.clone(),
            content,
            message_type: MessageType::Text,
            is_edited: false,
            confidence_score: 1.0,
            confidence_reason: format!(
                "{} {}",
                ReliabilityStatus::Verified.glyph(),
                ReliabilityStatus::Verified.label()
            ),
        }
    }

    /// Appends a continuation line to both `content` and `raw_message`.
    pub(crate) fn append_line(&mut self, line: &str) {
        self.content.push('\n');
        self.content.push_str(line);
        self.raw_message.push('\n');
        self.raw_message.push_str(line);
    }

    /// Returns `true` if the message spans more than one source line.
    pub fn is_multiline(&self) -> bool {
        self.raw_message.contains('\n')
    }

    /// Number of source lines attributed to this message.
    pub fn line_count(&self) -> usize {
        self.raw_message.lines().count().max(1)
    }

    /// Returns `true` for system lines.
    pub fn is_system(&self) -> bool {
        self.message_type == MessageType::System
    }

    /// Reliability category named in the reason, if any.
    pub fn reliability(&self) -> Option<ReliabilityStatus> {
        ReliabilityStatus::from_reason(&self.confidence_reason)
    }

    /// Presentation bucket for the score.
    pub fn confidence_band(&self) -> ConfidenceBand {
        ConfidenceBand::from_score(self.confidence_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_new() {
        let msg = ReconstructedMessage::new(UploadId::new(1), "Alice", "1/2/23, 10:00", "Hi");
        assert_eq!(msg.upload_id, UploadId(1));
        assert_eq!(msg.chat_name, UNKNOWN_CHAT);
        assert_eq!(msg.content, "Hi");
        assert_eq!(msg.raw_message, "Hi");
        assert!(!msg.is_edited);
        assert_eq!(msg.reliability(), Some(ReliabilityStatus::Verified));
    }

    #[test]
    fn test_append_line_keeps_fields_in_lockstep() {
        let mut msg = ReconstructedMessage::new(UploadId::new(1), "Alice", "ts", "first");
        msg.append_line("second");
        msg.append_line("third");
        assert_eq!(msg.content, "first\nsecond\nthird");
        assert_eq!(msg.raw_message, "first\nsecond\nthird");
        assert!(msg.is_multiline());
        assert_eq!(msg.line_count(), 3);
    }

    #[test]
    fn test_message_type_round_trip_names() {
        for ty in MessageType::all() {
            assert_eq!(ty.as_str().parse::<MessageType>().unwrap(), *ty);
        }
        assert!("video".parse::<MessageType>().is_err());
    }

    #[test]
    fn test_reliability_labels() {
        assert_eq!(ReliabilityStatus::NeedsReview.label(), "Needs Review");
        assert_eq!(ReliabilityStatus::Unverifiable.as_str(), "unverifiable");
        assert_eq!(
            ReliabilityStatus::from_reason("✓ Verified\nStandard"),
            Some(ReliabilityStatus::Verified)
        );
    }

    #[test]
    fn test_confidence_band_boundaries() {
        assert_eq!(ConfidenceBand::from_score(1.0), ConfidenceBand::Trusted);
        assert_eq!(ConfidenceBand::from_score(0.9), ConfidenceBand::Trusted);
        assert_eq!(ConfidenceBand::from_score(0.6), ConfidenceBand::Review);
        assert_eq!(ConfidenceBand::from_score(0.59), ConfidenceBand::Flagged);
    }

    #[test]
    fn test_message_serialization_uses_camel_case() {
        let msg = ReconstructedMessage::new(UploadId::new(3), "Bob", "ts", "Hello");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"uploadId\":3"));
        assert!(json.contains("\"timestampOriginal\":\"ts\""));
        assert!(json.contains("\"messageType\":\"text\""));
        // normalized timestamp is skipped when absent
        assert!(!json.contains("timestampNormalized"));
    }

    #[test]
    fn test_message_deserialization() {
        let json = r#"{
            "uploadId": 9, "chatName": "Unknown", "senderName": null,
            "timestampOriginal": "1/2/23, 10:00", "content": "x",
            "messageType": "system", "confidenceScore": 0.9,
            "confidenceReason": "◐ Likely Accurate", "rawMessage": "x"
        }"#;
        let msg: ReconstructedMessage = serde_json::from_str(json).unwrap();
        assert_eq!(msg.upload_id, UploadId(9));
        assert!(msg.sender_name.is_none());
        assert!(msg.is_system());
        assert!(!msg.is_edited);
        assert_eq!(msg.confidence_band(), ConfidenceBand::Trusted);
    }
}
