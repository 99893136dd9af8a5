//! # chatgram
//!
//! A Rust library for importing Telegram Desktop exports and counting
//! messages per day, month or year for each chat.
//!
//! ## Overview
//!
//! chatgram reads the whole-account JSON export (`result.json`) produced by
//! Telegram Desktop, keeps the text messages of every chat and turns them into
//! histogram series ready for charting. Service events, media-only posts and
//! messages from deleted accounts are skipped; structurally broken exports are
//! rejected with a classified [`ImportError`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatgram::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut dataset = Dataset::new();
//!     dataset.import_file("result.json")?;
//!
//!     let config = HistogramConfig::new().with_unit(TimeUnit::Month);
//!     let series = dataset
//!         .snapshot()
//!         .all_series(&config, &DateRange::new(), &ChatSelection::all());
//!
//!     write_csv(&series, "histogram.csv")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Observing imports
//!
//! ```rust
//! use chatgram::dataset::Dataset;
//!
//! let mut dataset = Dataset::new();
//! dataset.register_observer(|d| {
//!     println!("{} chats, latest message at {:?}", d.chats().len(), d.latest());
//! });
//! ```
//!
//! ## Module Structure
//!
//! - [`message`], [`chat`] - Immutable domain types
//! - [`parsing`] - Record-level parsing of export JSON
//! - [`importer`] - [`TelegramImporter`], reads a whole export
//! - [`dataset`] - [`Dataset`] with bounds, observers and snapshots
//! - [`core`] - Histograms, filters and output writers
//! - [`config`] - [`HistogramConfig`]
//! - [`format`] - [`OutputFormat`](format::OutputFormat) and format dispatch
//! - [`cli`], [`logging`] - Binary support (`cli` feature)
//! - [`error`] - Error types ([`ImportError`], [`ChatgramError`], [`Result`])
//! - [`prelude`] - Convenient re-exports

pub mod chat;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod dataset;
pub mod error;
pub mod format;
pub mod importer;
#[cfg(feature = "cli")]
pub mod logging;
pub mod message;
pub mod parsing;

// Re-export the main types at the crate root for convenience
pub use chat::Chat;
pub use config::HistogramConfig;
pub use dataset::{Dataset, DatasetSnapshot, TimeBounds};
pub use error::{ChatgramError, ImportError, Result};
pub use importer::{ImportReport, TelegramImporter};
pub use message::Message;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatgram::prelude::*;
/// ```
pub mod prelude {
    // Domain types
    pub use crate::{Chat, Message};

    // Error types
    pub use crate::error::{ChatgramError, DateFault, ImportError, Result};

    // Import
    pub use crate::importer::{ImportReport, TelegramImporter};
    pub use crate::parsing::{DiscardReason, MessageOutcome};

    // Dataset
    pub use crate::dataset::{Dataset, DatasetSnapshot, TimeBounds};

    // Histograms
    pub use crate::config::HistogramConfig;
    pub use crate::core::filter::{ChatSelection, DateRange};
    pub use crate::core::histogram::{
        Bucket, BucketUnit, FillMode, HistogramSeries, TimeUnit, build_series,
    };

    // Output (file writers and string converters)
    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_json, to_jsonl, write_json, write_jsonl};
    pub use crate::format::{OutputFormat, write_to_format};
}
