//! Line classification for WhatsApp-style exports.
//!
//! Exports come in three line-start shapes:
//!
//! - **Bracketed** (iOS): `[1/15/24, 10:30:45 AM] Sender: Message`
//! - **Dashed** (Android): `15/01/2024, 10:30 - Sender: Message`
//! - **System**: `15/01/2024, 10:30 - Alice created group "Trip"`
//!
//! The shapes are tried in that order and the first match wins. Anything
//! else is a continuation of the previous message (or an orphan if there is
//! none). Matching is purely structural: `32/13/24` is still a timestamp
//! here and only fails later, in normalisation.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Date token shared by every dialect: `D/M/Y` or `D-M-Y`. ASCII digits only.
const DATE: &str = r"[0-9]{1,2}[/-][0-9]{1,2}[/-][0-9]{2,4}";

/// Time token: `H:MM`, optional seconds.
const TIME: &str = r"[0-9]{1,2}:[0-9]{2}(?::[0-9]{2})?";

/// `[ts] Sender: Message`, brackets optional.
static BRACKETED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)^(\[)?({DATE},? {TIME}(?: [AP]M)?)\]? (.*?): (.*)"
    ))
    .expect("bracketed dialect pattern is valid")
});

/// `ts - Sender: Message`
static DASHED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)^({DATE},? {TIME}(?: [AP]M)?) - (.*?): (.*)"
    ))
    .expect("dashed dialect pattern is valid")
});

/// `ts - text`
static SYSTEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)^({DATE},? {TIME}(?: [AP]M)?) - (.*)"
    ))
    .expect("system dialect pattern is valid")
});

/// A recognised line-start shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// iOS export, optionally bracketed timestamp, 12-hour clock.
    Bracketed,
    /// Android export, dash separator, 24-hour clock.
    Dashed,
    /// Dash separator with no sender segment.
    System,
}

impl Dialect {
    /// Returns the dialects in matching priority order.
    pub fn all() -> &'static [Dialect] {
        &[Dialect::Bracketed, Dialect::Dashed, Dialect::System]
    }

    /// Returns a short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Dialect::Bracketed => "bracketed",
            Dialect::Dashed => "dashed",
            Dialect::System => "system",
        }
    }

    fn regex(self) -> &'static Regex {
        match self {
            Dialect::Bracketed => &*BRACKETED,
            Dialect::Dashed => &*DASHED,
            Dialect::System => &*SYSTEM,
        }
    }

    /// Tries this dialect against a trimmed line.
    pub fn try_match(self, line: &str) -> Option<LineMatch<'_>> {
        let caps = self.regex().captures(line)?;

        match self {
            Dialect::Bracketed => {
                let sender = group(&caps, 3);
                // Unbracketed "ts - Name: text" is a dashed line.
                if caps.get(1).is_none() && sender.starts_with("- ") {
                    return None;
                }
                Some(LineMatch {
                    dialect: self,
                    timestamp: group(&caps, 2),
                    sender: Some(sender.trim()),
                    text: group(&caps, 4),
                })
            }
            Dialect::Dashed => Some(LineMatch {
                dialect: self,
                timestamp: group(&caps, 1),
                sender: Some(group(&caps, 2).trim()),
                text: group(&caps, 3),
            }),
            Dialect::System => Some(LineMatch {
                dialect: self,
                timestamp: group(&caps, 1),
                sender: None,
                text: group(&caps, 2),
            }),
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn group<'t>(caps: &Captures<'t>, index: usize) -> &'t str {
    caps.get(index).map_or("", |m| m.as_str())
}

/// Pieces captured from a message-start line. Borrows from the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineMatch<'a> {
    pub dialect: Dialect,
    /// Verbatim timestamp, without brackets.
    pub timestamp: &'a str,
    /// Sender, trimmed. `None` for system lines.
    pub sender: Option<&'a str>,
    /// Message text after the sender separator.
    pub text: &'a str,
}

/// Classifies a trimmed, non-empty line.
///
/// Returns `None` when the line opens no message.
///
/// # Example
///
/// ```rust
/// use chatledger::parsing::{Dialect, classify_line};
///
/// let m = classify_line("01/02/23, 10:00 - Alice: hi").unwrap();
/// assert_eq!(m.dialect, Dialect::Dashed);
/// assert_eq!(m.sender, Some("Alice"));
/// assert_eq!(m.text, "hi");
///
/// assert!(classify_line("just some words").is_none());
/// ```
pub fn classify_line(line: &str) -> Option<LineMatch<'_>> {
    Dialect::all()
        .iter()
        .find_map(|dialect| dialect.try_match(line))
}
