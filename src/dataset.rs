//! The imported chats and their time bounds.
//!
//! A [`Dataset`] holds the result of the most recent successful import.
//! Replacing its chats recomputes the bounds and then notifies every
//! registered observer, synchronously and in registration order. Failed
//! imports leave the dataset untouched and notify no one.
//!
//! # Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use chatgram::dataset::Dataset;
//!
//! let mut dataset = Dataset::new();
//! let seen = Rc::new(Cell::new(0));
//!
//! let counter = Rc::clone(&seen);
//! dataset.register_observer(move |_| counter.set(counter.get() + 1));
//! assert_eq!(seen.get(), 1);
//!
//! let json = r#"{"chats": {"list": [{"name": "Notes", "messages": [
//!     {"type": "message", "date": "2024-01-15T10:30:00", "from": "Me", "text": "todo"}
//! ]}]}}"#;
//! dataset.import_from_reader(json.as_bytes())?;
//!
//! assert_eq!(seen.get(), 2);
//! assert_eq!(dataset.message_count(), 1);
//! # Ok::<(), chatgram::ImportError>(())
//! ```

use std::fmt;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::Chat;
use crate::config::HistogramConfig;
use crate::core::filter::{ChatSelection, DateRange};
use crate::core::histogram::{HistogramSeries, build_series};
use crate::error::ImportError;
use crate::importer::{ImportReport, TelegramImporter};

/// Earliest and latest message timestamp over all chats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeBounds {
    pub earliest: NaiveDateTime,
    pub latest: NaiveDateTime,
}

impl TimeBounds {
    /// Computes bounds over every message in `chats`.
    ///
    /// Returns `None` when there are no messages at all.
    pub fn of(chats: &[Chat]) -> Option<Self> {
        let mut stamps = chats.iter().flat_map(Chat::iter).map(|m| m.timestamp());
        let first = stamps.next()?;
        let (earliest, latest) = stamps.fold((first, first), |(lo, hi), ts| (lo.min(ts), hi.max(ts)));
        Some(Self { earliest, latest })
    }
}

type Observer = Box<dyn FnMut(&Dataset)>;

/// Owner of the current chat collection.
pub struct Dataset {
    chats: Arc<[Chat]>,
    bounds: Option<TimeBounds>,
    observers: Vec<Observer>,
}

impl Default for Dataset {
    fn default() -> Self {
        Self {
            chats: Arc::from(Vec::new()),
            bounds: None,
            observers: Vec::new(),
        }
    }
}

impl fmt::Debug for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dataset")
            .field("chats", &self.chats.len())
            .field("bounds", &self.bounds)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Dataset {
    /// Creates an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the chats, recomputes the bounds and notifies observers.
    pub fn replace_chats(&mut self, chats: Vec<Chat>) {
        self.bounds = TimeBounds::of(&chats);
        self.chats = Arc::from(chats);
        tracing::debug!(
            chats = self.chats.len(),
            observers = self.observers.len(),
            "Dataset replaced"
        );
        self.notify();
    }

    /// Registers `observer` and calls it once with the current state.
    ///
    /// After that it is called once per [`replace_chats`](Self::replace_chats).
    ///
    /// # Panics
    ///
    /// Observers must not panic. A panic during notification unwinds out of
    /// `replace_chats` and leaves the dataset without observers.
    pub fn register_observer(&mut self, observer: impl FnMut(&Dataset) + 'static) {
        let mut observer: Observer = Box::new(observer);
        observer(&*self);
        self.observers.push(observer);
    }

    fn notify(&mut self) {
        // Detached while running so each observer can borrow the whole dataset
        let mut observers = std::mem::take(&mut self.observers);
        for observer in &mut observers {
            observer(&*self);
        }
        self.observers = observers;
    }

    /// Imports from a byte stream and replaces the chats on success.
    pub fn import_from_reader<R: Read>(&mut self, reader: R) -> Result<ImportReport, ImportError> {
        self.import_with(TelegramImporter::new(reader))
    }

    /// Imports an export file and replaces the chats on success.
    pub fn import_file(&mut self, path: impl AsRef<Path>) -> Result<ImportReport, ImportError> {
        let path = path.as_ref();
        let importer = TelegramImporter::from_path(path).inspect_err(|err| {
            tracing::warn!(path = %path.display(), error = %err, "Import failed");
        })?;
        self.import_with(importer)
    }

    fn import_with<R: Read>(&mut self, importer: TelegramImporter<R>) -> Result<ImportReport, ImportError> {
        match importer.import_chats_with_report() {
            Ok((chats, report)) => {
                self.replace_chats(chats);
                Ok(report)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Import failed, keeping previous data");
                Err(err)
            }
        }
    }

    /// All chats in import order.
    pub fn chats(&self) -> &[Chat] {
        &self.chats
    }

    /// Looks up a chat by exact name.
    pub fn chat(&self, name: &str) -> Option<&Chat> {
        self.chats.iter().find(|c| c.name() == name)
    }

    pub fn bounds(&self) -> Option<TimeBounds> {
        self.bounds
    }

    /// Timestamp of the oldest message, if any.
    pub fn earliest(&self) -> Option<NaiveDateTime> {
        self.bounds.map(|b| b.earliest)
    }

    /// Timestamp of the newest message, if any.
    pub fn latest(&self) -> Option<NaiveDateTime> {
        self.bounds.map(|b| b.latest)
    }

    /// Number of messages over all chats.
    pub fn message_count(&self) -> usize {
        self.chats.iter().map(Chat::len).sum()
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// An immutable view of the current chats and bounds.
    ///
    /// The snapshot is unaffected by later replacements.
    pub fn snapshot(&self) -> DatasetSnapshot {
        DatasetSnapshot {
            chats: Arc::clone(&self.chats),
            bounds: self.bounds,
        }
    }
}

/// A frozen view of a [`Dataset`], used for histogram queries.
#[derive(Debug, Clone)]
pub struct DatasetSnapshot {
    chats: Arc<[Chat]>,
    bounds: Option<TimeBounds>,
}

impl DatasetSnapshot {
    pub fn chats(&self) -> &[Chat] {
        &self.chats
    }

    pub fn bounds(&self) -> Option<TimeBounds> {
        self.bounds
    }

    /// Histogram of `chat` over `range`.
    ///
    /// Open ends of `range` default to the days of the snapshot's earliest
    /// and latest message. Returns `None` when an end is open and the
    /// snapshot has no messages.
    pub fn series(&self, chat: &Chat, config: &HistogramConfig, range: &DateRange) -> Option<HistogramSeries> {
        let (lower, upper) = range.resolve(self.bounds)?;
        Some(build_series(chat, lower, upper, config))
    }

    /// Histograms of every selected chat, in dataset order.
    pub fn all_series(
        &self,
        config: &HistogramConfig,
        range: &DateRange,
        selection: &ChatSelection,
    ) -> Vec<HistogramSeries> {
        let Some((lower, upper)) = range.resolve(self.bounds) else {
            return Vec::new();
        };
        selection
            .apply(&self.chats)
            .map(|chat| build_series(chat, lower, upper, config))
            .collect()
    }
}
