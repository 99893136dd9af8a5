//! Query filters: which chats and which days a histogram covers.
//!
//! | Filter | Type | Description |
//! |--------|------|-------------|
//! | Date range | [`DateRange`] | Inclusive day range, open ends default to the dataset bounds |
//! | Chats | [`ChatSelection`] | All chats, or an explicit set of names |
//!
//! # Examples
//!
//! ```
//! use chatgram::core::filter::{ChatSelection, DateRange};
//!
//! # fn main() -> chatgram::Result<()> {
//! let range = DateRange::new()
//!     .with_from("2024-06-01")?
//!     .with_to("2024-12-31")?;
//! assert!(range.from.is_some());
//!
//! let selection = ChatSelection::only(["Family", "Work"]);
//! assert!(selection.matches("Work"));
//! assert!(!selection.matches("work"));
//! # Ok(())
//! # }
//! ```
//!
//! # Behavior Notes
//!
//! - The lower bound starts at 00:00:00 of the `from` day, the upper bound
//!   ends at the last nanosecond of the `to` day
//! - Chat names are matched exactly

use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::Chat;
use crate::dataset::TimeBounds;
use crate::error::ChatgramError;

/// An inclusive range of days.
///
/// Missing ends are filled from the dataset when the range is
/// [resolved](Self::resolve).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day included.
    pub from: Option<NaiveDate>,

    /// Last day included.
    pub to: Option<NaiveDate>,
}

impl DateRange {
    /// Creates an open range.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a range with both ends fixed.
    pub fn between(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    /// Sets the first day from a `YYYY-MM-DD` literal.
    ///
    /// # Errors
    ///
    /// Returns [`ChatgramError::InvalidDate`] if the format is invalid.
    pub fn with_from(mut self, date_str: &str) -> Result<Self, ChatgramError> {
        self.from = Some(parse_day(date_str)?);
        Ok(self)
    }

    /// Sets the last day from a `YYYY-MM-DD` literal.
    ///
    /// # Errors
    ///
    /// Returns [`ChatgramError::InvalidDate`] if the format is invalid.
    pub fn with_to(mut self, date_str: &str) -> Result<Self, ChatgramError> {
        self.to = Some(parse_day(date_str)?);
        Ok(self)
    }

    /// Returns `true` if neither end is set.
    pub fn is_open(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Turns the range into inclusive datetime bounds.
    ///
    /// An unset `from` takes the day of `bounds.earliest`, an unset `to` the
    /// day of `bounds.latest`. Returns `None` if an end is unset and there are
    /// no bounds to fall back on.
    ///
    /// ```
    /// use chatgram::core::filter::DateRange;
    ///
    /// # fn main() -> chatgram::Result<()> {
    /// let (lower, upper) = DateRange::new()
    ///     .with_from("2024-01-01")?
    ///     .with_to("2024-01-31")?
    ///     .resolve(None)
    ///     .unwrap();
    ///
    /// assert_eq!(lower.to_string(), "2024-01-01 00:00:00");
    /// assert_eq!(upper.to_string(), "2024-01-31 23:59:59.999999999");
    /// # Ok(())
    /// # }
    /// ```
    pub fn resolve(&self, bounds: Option<TimeBounds>) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let from = self.from.or_else(|| bounds.map(|b| b.earliest.date()))?;
        let to = self.to.or_else(|| bounds.map(|b| b.latest.date()))?;
        Some((from.and_time(NaiveTime::MIN), to.and_hms_nano_opt(23, 59, 59, 999_999_999)?))
    }
}

fn parse_day(date_str: &str) -> Result<NaiveDate, ChatgramError> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|_| ChatgramError::invalid_date(date_str))
}

/// Which chats to build series for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ChatSelection {
    /// Every chat.
    #[default]
    All,
    /// Only chats with one of these names.
    Only(BTreeSet<String>),
}

impl ChatSelection {
    /// Selects every chat.
    pub fn all() -> Self {
        ChatSelection::All
    }

    /// Selects chats by exact name.
    pub fn only<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ChatSelection::Only(names.into_iter().map(Into::into).collect())
    }

    /// Returns `true` if the chat named `name` is selected.
    pub fn matches(&self, name: &str) -> bool {
        match self {
            ChatSelection::All => true,
            ChatSelection::Only(names) => names.contains(name),
        }
    }

    /// Selected chats, in their original order.
    pub fn apply<'a>(&'a self, chats: &'a [Chat]) -> impl Iterator<Item = &'a Chat> + 'a {
        chats.iter().filter(move |chat| self.matches(chat.name()))
    }
}
