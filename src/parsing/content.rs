//! Content-type detection.

use crate::message::MessageType;

/// Placeholder the exporter writes instead of an attachment.
pub const MEDIA_OMITTED_MARKER: &str = "<Media omitted>";

/// Text the exporter writes for a message deleted by its sender.
pub const DELETED_MARKER: &str = "This message was deleted";

/// Classifies message text as media, deleted or plain text.
///
/// Markers are matched exactly (case-sensitive) anywhere in the text; the
/// media marker wins when both appear. System lines are typed by the
/// parser and never pass through here.
///
/// ```rust
/// use chatledger::message::MessageType;
/// use chatledger::parsing::detect_content_type;
///
/// assert_eq!(detect_content_type("<Media omitted>"), MessageType::Media);
/// assert_eq!(detect_content_type("This message was deleted"), MessageType::Deleted);
/// assert_eq!(detect_content_type("see you at 5"), MessageType::Text);
/// ```
pub fn detect_content_type(content: &str) -> MessageType {
    if content.contains(MEDIA_OMITTED_MARKER) {
        MessageType::Media
    } else if content.contains(DELETED_MARKER) {
        MessageType::Deleted
    } else {
        MessageType::Text
    }
}
