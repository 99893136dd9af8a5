//! Text message type.
//!
//! [`Message`] is an immutable record of one text message: who sent it, what
//! it said (flattened to plain text) and when. Timestamps are local
//! date-times without a zone, exactly as they appear in Telegram exports.
//!
//! # Examples
//!
//! ```
//! use chatgram::Message;
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2024, 1, 15)
//!     .unwrap()
//!     .and_hms_opt(10, 30, 0)
//!     .unwrap();
//! let msg = Message::new("Alice", "Hello, world!", ts);
//!
//! assert_eq!(msg.sender(), "Alice");
//! assert_eq!(msg.content(), "Hello, world!");
//! assert_eq!(msg.timestamp(), ts);
//! ```
//!
//! ## Serialization
//!
//! ```
//! use chatgram::Message;
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap().and_hms_opt(10, 30, 0).unwrap();
//! let msg = Message::new("Alice", "Hello!", ts);
//! let json = serde_json::to_string(&msg)?;
//!
//! assert!(json.contains("2024-01-15T10:30:00"));
//! # Ok::<(), serde_json::Error>(())
//! ```

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single text message from a chat export.
///
/// Equality and hashing are structural over all three fields, so two imports
/// of the same document produce equal messages.
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `sender` | `String` | Display name of the author |
/// | `content` | `String` | Flattened text content |
/// | `timestamp` | `NaiveDateTime` | When the message was sent (local time) |
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Message {
    sender: String,
    content: String,
    timestamp: NaiveDateTime,
}

impl Message {
    /// Creates a new message.
    pub fn new(
        sender: impl Into<String>,
        content: impl Into<String>,
        timestamp: NaiveDateTime,
    ) -> Self {
        Self {
            sender: sender.into(),
            content: content.into(),
            timestamp,
        }
    }

    /// Returns the sender name.
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Returns the message content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns when the message was sent.
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }
}
