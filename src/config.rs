//! Parser configuration.
//!
//! A plain serde-derivable struct with builder methods, usable without any
//! CLI framework. Report options live in
//! [`OutputConfig`](crate::core::models::OutputConfig).
//!
//! # Example
//!
//! ```rust
//! use chatledger::config::ParserConfig;
//! use chatledger::parser::ChatLogParser;
//!
//! let config = ParserConfig::new().with_chat_name("Family");
//! let parser = ChatLogParser::with_config(config);
//! assert_eq!(parser.config().chat_name, "Family");
//! ```

use serde::{Deserialize, Serialize};

use crate::message::{SYSTEM_SENDER, UNKNOWN_CHAT};

/// Configuration for chat log reconstruction.
///
/// The defaults reproduce the ledger's fixed placeholders: every message is
/// filed under the chat `"Unknown"` and system lines are attributed to
/// `"System"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Chat name written onto every message (default: `"Unknown"`)
    pub chat_name: String,

    /// Sender label for system lines (default: `"System"`)
    pub system_sender: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            chat_name: UNKNOWN_CHAT.to_string(),
            system_sender: SYSTEM_SENDER.to_string(),
        }
    }
}

impl ParserConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the chat name placeholder.
    #[must_use]
    pub fn with_chat_name(mut self, name: impl Into<String>) -> Self {
        self.chat_name = name.into();
        self
    }

    /// Sets the sender label used for system lines.
    #[must_use]
    pub fn with_system_sender(mut self, sender: impl Into<String>) -> Self {
        self.system_sender = sender.into();
        self
    }
}
