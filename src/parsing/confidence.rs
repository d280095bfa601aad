//! Confidence assignment for reconstructed messages.
//!
//! Every message gets a score and a reason when it opens, keyed by the
//! dialect that matched. The only later adjustment is a one-time downgrade
//! when a fully verified message turns out to span several lines.

use crate::message::{ReconstructedMessage, ReliabilityStatus};

use super::dialect::Dialect;

/// Score for a message that matched a standard format unambiguously.
pub const VERIFIED_SCORE: f64 = 1.0;

/// Score for a system line whose sender was synthesized.
pub const SYSTEM_SCORE: f64 = 0.9;

/// Score after a verified message gains its first continuation line.
pub const MULTILINE_SCORE: f64 = 0.95;

/// A score together with the category and note that explain it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Assessment {
    pub score: f64,
    pub status: ReliabilityStatus,
    pub note: &'static str,
}

impl Assessment {
    /// Renders the reason text: glyph, label, then the note on its own line.
    ///
    /// ```rust
    /// use chatledger::parsing::{Dialect, initial_assessment};
    ///
    /// let reason = initial_assessment(Dialect::System).reason();
    /// assert_eq!(
    ///     reason,
    ///     "◐ Likely Accurate\nSystem message format recognized, but sender auto-filled."
    /// );
    /// ```
    pub fn reason(&self) -> String {
        format!("{} {}\n{}", self.status.glyph(), self.status.label(), self.note)
    }
}

/// Confidence for a freshly opened message.
pub fn initial_assessment(dialect: Dialect) -> Assessment {
    match dialect {
        Dialect::Bracketed => Assessment {
            score: VERIFIED_SCORE,
            status: ReliabilityStatus::Verified,
            note: "Standard iOS format with 12-hour timestamp. No ambiguities detected.",
        },
        Dialect::Dashed => Assessment {
            score: VERIFIED_SCORE,
            status: ReliabilityStatus::Verified,
            note: "Standard Android format with 24-hour timestamp. No ambiguities detected.",
        },
        Dialect::System => Assessment {
            score: SYSTEM_SCORE,
            status: ReliabilityStatus::Likely,
            note: "System message format recognized, but sender auto-filled.",
        },
    }
}

/// Confidence after a verified message gains a continuation line.
pub fn multiline_assessment() -> Assessment {
    Assessment {
        score: MULTILINE_SCORE,
        status: ReliabilityStatus::Likely,
        note: "Message spans multiple lines. Sender confirmed by timestamp match.",
    }
}

/// Applies the multi-line downgrade to a message that just gained a line.
///
/// Only a score of exactly [`VERIFIED_SCORE`] is lowered, so the downgrade
/// happens at most once and never touches system lines (which open below
/// it). Returns `true` if the message changed.
#[allow(clippy::float_cmp)]
pub fn downgrade_for_continuation(message: &mut ReconstructedMessage) -> bool {
    if message.confidence_score != VERIFIED_SCORE {
        return false;
    }
    let assessment = multiline_assessment();
    message.confidence_score = assessment.score;
    message.confidence_reason = assessment.reason();
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::UploadId;

    #[test]
    fn test_initial_reasons_are_exact() {
        assert_eq!(
            initial_assessment(Dialect::Bracketed).reason(),
            "✓ Verified\nStandard iOS format with 12-hour timestamp. No ambiguities detected."
        );
        assert_eq!(
            initial_assessment(Dialect::Dashed).reason(),
            "✓ Verified\nStandard Android format with 24-hour timestamp. No ambiguities detected."
        );
        assert_eq!(initial_assessment(Dialect::System).score, SYSTEM_SCORE);
    }

    #[test]
    fn test_downgrade_happens_once() {
        let mut msg = ReconstructedMessage::new(UploadId::new(1), "Alice", "ts", "a");
        assert!(downgrade_for_continuation(&mut msg));
        assert_eq!(msg.confidence_score, MULTILINE_SCORE);
        assert_eq!(
            msg.confidence_reason,
            "◐ Likely Accurate\nMessage spans multiple lines. Sender confirmed by timestamp match."
        );

        assert!(!downgrade_for_continuation(&mut msg));
        assert_eq!(msg.confidence_score, MULTILINE_SCORE);
    }

    #[test]
    fn test_downgrade_skips_messages_below_verified() {
        let mut msg = ReconstructedMessage::new(UploadId::new(1), "System", "ts", "a");
        let system = initial_assessment(Dialect::System);
        msg.confidence_score = system.score;
        msg.confidence_reason = system.reason();

        assert!(!downgrade_for_continuation(&mut msg));
        assert_eq!(msg.confidence_reason, system.reason());
    }
}
