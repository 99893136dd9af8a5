//! Core processing logic for chatgram.
//!
//! This module contains:
//! - [`histogram`] - Time buckets and per-chat series
//! - [`filter`] - Date ranges and chat selection
//! - [`output`] - Format writers (CSV, JSON, JSONL)
//!
//! # Quick Start
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn example() {
//! use chatgram::core::{
//!     ChatSelection, DateRange, HistogramSeries, TimeUnit,
//!     build_series, write_csv, write_json, write_jsonl,
//! };
//! # }
//! ```

pub mod filter;
pub mod histogram;
pub mod output;

// Re-export main types for convenience
pub use filter::{ChatSelection, DateRange};
pub use histogram::{
    Bucket, BucketUnit, FillMode, HistogramSeries, TimeUnit, bucket_key, bucket_start,
    build_series, effective_unit,
};

// Conditionally re-export output writers
#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{to_json, to_jsonl, write_json, write_jsonl};
