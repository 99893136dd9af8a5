//! Parsing of export records.
//!
//! [`telegram`] holds the per-record rules used by
//! [`TelegramImporter`](crate::importer::TelegramImporter): text flattening,
//! date parsing and the include/discard/fail decision for each message.

pub mod telegram;

pub use telegram::{DiscardReason, MessageOutcome, RecordPath, flatten_text, parse_date, parse_message};
