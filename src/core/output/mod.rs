//! Histogram series writers.
//!
//! This module provides writers for different output formats:
//! - [`write_csv`] / [`to_csv`] - one row per bucket, semicolon delimiter - requires `csv-output` feature
//! - [`write_json`] / [`to_json`] - JSON array of series - requires `json-output` feature
//! - [`write_jsonl`] / [`to_jsonl`] - one series per line - requires `json-output` feature
//!
//! # Choosing a Format
//!
//! | Format | Use Case |
//! |--------|----------|
//! | CSV | Spreadsheets, gnuplot, pandas |
//! | JSON | Web charting libraries |
//! | JSONL | Streaming into other tools, one chat at a time |
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> chatgram::Result<()> {
//! use chatgram::core::output::{to_csv, write_json};
//! use chatgram::config::HistogramConfig;
//! use chatgram::core::filter::{ChatSelection, DateRange};
//! use chatgram::dataset::Dataset;
//!
//! let mut dataset = Dataset::new();
//! dataset.import_file("result.json")?;
//!
//! let series = dataset.snapshot().all_series(
//!     &HistogramConfig::new(),
//!     &DateRange::new(),
//!     &ChatSelection::all(),
//! );
//!
//! write_json(&series, "histogram.json")?;
//! let csv_string = to_csv(&series)?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl};

#[cfg(feature = "json-output")]
use chrono::NaiveDate;
#[cfg(feature = "json-output")]
use serde::Serialize;

#[cfg(feature = "json-output")]
use crate::core::histogram::{BucketUnit, HistogramSeries};

/// Serialized form of a series, shared by the JSON writers.
#[cfg(feature = "json-output")]
#[derive(Serialize)]
struct SeriesRecord<'a> {
    chat: &'a str,
    unit: BucketUnit,
    total: u64,
    buckets: Vec<BucketRecord>,
}

#[cfg(feature = "json-output")]
#[derive(Serialize)]
struct BucketRecord {
    key: i64,
    start: Option<NaiveDate>,
    count: u64,
}

#[cfg(feature = "json-output")]
impl<'a> SeriesRecord<'a> {
    fn from_series(series: &'a HistogramSeries) -> Self {
        Self {
            chat: series.name(),
            unit: series.unit(),
            total: series.total(),
            buckets: series
                .buckets()
                .iter()
                .map(|b| BucketRecord {
                    key: b.key,
                    start: series.start_of(b),
                    count: b.count,
                })
                .collect(),
        }
    }
}
