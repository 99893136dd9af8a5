//! Chat type: a named, ordered sequence of messages.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::Message;

/// An immutable chat.
///
/// Messages keep the order they had in the export. The list is copied in at
/// construction and only ever handed out as a slice.
///
/// ```
/// use chatgram::{Chat, Message};
/// use chrono::NaiveDate;
///
/// let ts = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap().and_hms_opt(9, 0, 0).unwrap();
/// let chat = Chat::new("Family", vec![Message::new("Mom", "Dinner at 7", ts)]);
///
/// assert_eq!(chat.name(), "Family");
/// assert_eq!(chat.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Chat {
    name: String,
    messages: Vec<Message>,
}

impl Chat {
    /// Creates a chat from its name and messages.
    pub fn new(name: impl Into<String>, messages: impl Into<Vec<Message>>) -> Self {
        Self {
            name: name.into(),
            messages: messages.into(),
        }
    }

    /// Returns the chat name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the messages in export order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns an iterator over the messages.
    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }

    /// Returns the number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns `true` if the chat has no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Earliest message timestamp in this chat.
    ///
    /// Exports are chronological, but this does not rely on it.
    pub fn first_timestamp(&self) -> Option<NaiveDateTime> {
        self.messages.iter().map(Message::timestamp).min()
    }

    /// Latest message timestamp in this chat.
    pub fn last_timestamp(&self) -> Option<NaiveDateTime> {
        self.messages.iter().map(Message::timestamp).max()
    }
}

impl<'a> IntoIterator for &'a Chat {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}
