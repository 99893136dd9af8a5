//! Field-level parsing of Telegram export records.
//!
//! The importer walks the document; this module decides what each message
//! record becomes. Every record ends up in exactly one of three places:
//!
//! - [`MessageOutcome::Included`]: a valid text message;
//! - [`MessageOutcome::Discarded`]: expected non-content (service events,
//!   media-only posts, senders whose account was deleted);
//! - `Err(ImportError)`: a structural defect that aborts the import.
//!
//! Checks run in a fixed order (`type`, `text`, `from`, `date`), so a discard
//! decided early wins over defects in later fields.

use std::fmt;
use std::fmt::Write as _;

use chrono::{NaiveDateTime, Timelike};
use serde_json::{Map, Value};

use crate::Message;
use crate::error::{DateFault, ImportError};

/// The only record type that carries user text.
pub const MESSAGE_TYPE: &str = "message";

/// Why a record was left out of its chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiscardReason {
    /// `type` is something other than `"message"` (joins, renames, pins...).
    NotAMessage,
    /// The flattened `text` is empty, e.g. a photo without caption.
    EmptyContent,
    /// `from` is null: the sender deleted their account.
    DeletedSender,
}

impl fmt::Display for DiscardReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscardReason::NotAMessage => write!(f, "not a message"),
            DiscardReason::EmptyContent => write!(f, "empty content"),
            DiscardReason::DeletedSender => write!(f, "deleted sender"),
        }
    }
}

/// Result of looking at one message record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageOutcome {
    /// The record is a text message.
    Included(Message),
    /// The record is expected noise and is dropped silently.
    Discarded(DiscardReason),
}

impl MessageOutcome {
    /// Returns the message if the record was included.
    pub fn into_message(self) -> Option<Message> {
        match self {
            MessageOutcome::Included(msg) => Some(msg),
            MessageOutcome::Discarded(_) => None,
        }
    }
}

/// Location of a record inside the export, used to name fields in errors.
///
/// Paths are only rendered when an error is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordPath {
    chat: Option<usize>,
    message: Option<usize>,
}

impl RecordPath {
    /// The document root.
    pub fn root() -> Self {
        Self::default()
    }

    /// The chat at `index` in `chats.list`.
    pub fn chat(index: usize) -> Self {
        Self {
            chat: Some(index),
            message: None,
        }
    }

    /// The message at `index` within this chat.
    #[must_use]
    pub fn message(self, index: usize) -> Self {
        Self {
            message: Some(index),
            ..self
        }
    }

    /// Renders the record itself, e.g. `chats.list[2].messages[5]`.
    pub fn record(&self) -> String {
        let mut path = String::new();
        match self.chat {
            Some(chat) => {
                let _ = write!(path, "chats.list[{chat}]");
                if let Some(message) = self.message {
                    let _ = write!(path, ".messages[{message}]");
                }
            }
            None => path.push('$'),
        }
        path
    }

    /// Renders a field of the record, e.g. `chats.list[2].messages[5].date`.
    pub fn field(&self, key: &str) -> String {
        if self.chat.is_none() {
            return key.to_string();
        }
        format!("{}.{key}", self.record())
    }
}

/// JSON type name used in [`ImportError::UnexpectedSchema`].
pub fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ============================================================================
// Typed field access
// ============================================================================

pub(crate) fn as_object(
    value: &Value,
    path: impl FnOnce() -> String,
) -> Result<&Map<String, Value>, ImportError> {
    match value {
        Value::Object(obj) => Ok(obj),
        other => Err(ImportError::unexpected(path(), "object", json_type(other))),
    }
}

pub(crate) fn get<'a>(
    obj: &'a Map<String, Value>,
    key: &str,
    path: impl FnOnce() -> String,
) -> Result<&'a Value, ImportError> {
    obj.get(key).ok_or_else(|| ImportError::missing(path()))
}

pub(crate) fn get_str<'a>(
    obj: &'a Map<String, Value>,
    key: &str,
    path: impl FnOnce() -> String,
) -> Result<&'a str, ImportError> {
    match obj.get(key) {
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(ImportError::unexpected(path(), "string", json_type(other))),
        None => Err(ImportError::missing(path())),
    }
}

pub(crate) fn get_array<'a>(
    obj: &'a Map<String, Value>,
    key: &str,
    path: impl FnOnce() -> String,
) -> Result<&'a [Value], ImportError> {
    match obj.get(key) {
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(ImportError::unexpected(path(), "array", json_type(other))),
        None => Err(ImportError::missing(path())),
    }
}

pub(crate) fn get_object<'a>(
    obj: &'a Map<String, Value>,
    key: &str,
    path: impl FnOnce() -> String,
) -> Result<&'a Map<String, Value>, ImportError> {
    match obj.get(key) {
        Some(Value::Object(inner)) => Ok(inner),
        Some(other) => Err(ImportError::unexpected(path(), "object", json_type(other))),
        None => Err(ImportError::missing(path())),
    }
}

// ============================================================================
// Text and dates
// ============================================================================

/// Flattens Telegram's `text` field into one string.
///
/// The field is either a plain string or an array mixing plain strings and
/// entity objects (links, mentions, bold runs...) that carry their own `text`.
/// Parts are concatenated in order with no separator.
///
/// ```
/// use chatgram::parsing::telegram::flatten_text;
/// use serde_json::json;
///
/// let text = json!(["Check ", {"type": "link", "text": "https://example.com"}, "!"]);
/// assert_eq!(flatten_text(&text)?, "Check https://example.com!");
/// # Ok::<(), chatgram::ImportError>(())
/// ```
pub fn flatten_text(value: &Value) -> Result<String, ImportError> {
    flatten_text_at(value, RecordPath::root())
}

pub(crate) fn flatten_text_at(value: &Value, at: RecordPath) -> Result<String, ImportError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Array(parts) => {
            let mut text = String::new();
            for (index, part) in parts.iter().enumerate() {
                match part {
                    Value::String(s) => text.push_str(s),
                    Value::Object(entity) => {
                        let nested = get_str(entity, "text", || {
                            at.field(&format!("text[{index}].text"))
                        })?;
                        text.push_str(nested);
                    }
                    other => {
                        return Err(ImportError::unexpected(
                            at.field(&format!("text[{index}]")),
                            "string or object",
                            json_type(other),
                        ));
                    }
                }
            }
            Ok(text)
        }
        other => Err(ImportError::unexpected(
            at.field("text"),
            "string or array",
            json_type(other),
        )),
    }
}

/// Parses an export `date` literal (`YYYY-MM-DDTHH:MM[:SS[.fff]]`).
///
/// ```
/// use chatgram::parsing::telegram::parse_date;
///
/// assert!(parse_date("2024-01-15T10:30:00").is_ok());
/// assert!(parse_date("2024-01-15T10:30").is_ok());
/// assert!(parse_date("15.01.2024 10:30").is_err());
/// assert!(parse_date("2024-01-15T23:59:60").is_err());
/// ```
pub fn parse_date(literal: &str) -> Result<NaiveDateTime, DateFault> {
    let timestamp = NaiveDateTime::parse_from_str(literal, "%Y-%m-%dT%H:%M:%S%.f").or_else(|err| {
        NaiveDateTime::parse_from_str(literal, "%Y-%m-%dT%H:%M").map_err(|_| err)
    })?;
    // chrono represents second 60 as a nanosecond overflow
    if timestamp.nanosecond() >= 1_000_000_000 {
        return Err(DateFault::LeapSecond);
    }
    Ok(timestamp)
}

// ============================================================================
// Records
// ============================================================================

/// Parses one entry of a chat's `messages` array.
pub fn parse_message(value: &Value, at: RecordPath) -> Result<MessageOutcome, ImportError> {
    let record = as_object(value, || at.record())?;

    let record_type = get_str(record, "type", || at.field("type"))?;
    if record_type != MESSAGE_TYPE {
        return Ok(MessageOutcome::Discarded(DiscardReason::NotAMessage));
    }

    let text = get(record, "text", || at.field("text"))?;
    let content = flatten_text_at(text, at)?;
    if content.is_empty() {
        return Ok(MessageOutcome::Discarded(DiscardReason::EmptyContent));
    }

    let sender = match get(record, "from", || at.field("from"))? {
        Value::Null => return Ok(MessageOutcome::Discarded(DiscardReason::DeletedSender)),
        Value::String(s) => s,
        other => {
            return Err(ImportError::unexpected(
                at.field("from"),
                "string or null",
                json_type(other),
            ));
        }
    };

    let literal = get_str(record, "date", || at.field("date"))?;
    let timestamp = parse_date(literal).map_err(|source| ImportError::InvalidDate {
        field: at.field("date"),
        input: literal.to_string(),
        source,
    })?;

    Ok(MessageOutcome::Included(Message::new(
        sender.as_str(),
        content,
        timestamp,
    )))
}
