//! Per-chat message histograms.
//!
//! A histogram counts a chat's messages into time buckets (days, months or
//! years). Each bucket is identified by an integer key that increases by one
//! from one bucket to the next:
//!
//! | Unit | Key |
//! |------|-----|
//! | Day | days since 1970-01-01 |
//! | Month | `year * 12 + (month - 1)` |
//! | Year | calendar year |
//!
//! # Example
//!
//! ```
//! use chatgram::{Chat, Message};
//! use chatgram::config::HistogramConfig;
//! use chatgram::core::histogram::{BucketUnit, TimeUnit, build_series};
//! use chrono::NaiveDate;
//!
//! let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
//! let chat = Chat::new("Team", vec![
//!     Message::new("A", "hi", day(1).and_hms_opt(9, 0, 0).unwrap()),
//!     Message::new("B", "yo", day(3).and_hms_opt(9, 0, 0).unwrap()),
//! ]);
//!
//! let config = HistogramConfig::new().with_unit(TimeUnit::Day);
//! let series = build_series(
//!     &chat,
//!     day(1).and_hms_opt(0, 0, 0).unwrap(),
//!     day(3).and_hms_opt(23, 59, 59).unwrap(),
//!     &config,
//! );
//!
//! assert_eq!(series.unit(), BucketUnit::Day);
//! assert_eq!(series.counts().collect::<Vec<_>>(), vec![1, 0, 1]);
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::Chat;
use crate::config::HistogramConfig;
use crate::error::ChatgramError;

/// `NaiveDate::num_days_from_ce` of 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i64 = 719_163;

/// Time unit requested by a caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    /// Pick a unit from the width of the queried range.
    #[default]
    Automatic,
    Day,
    Month,
    Year,
}

impl TimeUnit {
    /// All units, in the order a picker would list them.
    pub const ALL: [TimeUnit; 4] = [
        TimeUnit::Automatic,
        TimeUnit::Day,
        TimeUnit::Month,
        TimeUnit::Year,
    ];

    /// The fixed bucket unit, or `None` for [`TimeUnit::Automatic`].
    pub fn bucket_unit(self) -> Option<BucketUnit> {
        match self {
            TimeUnit::Automatic => None,
            TimeUnit::Day => Some(BucketUnit::Day),
            TimeUnit::Month => Some(BucketUnit::Month),
            TimeUnit::Year => Some(BucketUnit::Year),
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TimeUnit::Automatic => "Automatic",
            TimeUnit::Day => "Day",
            TimeUnit::Month => "Month",
            TimeUnit::Year => "Year",
        };
        f.write_str(label)
    }
}

impl FromStr for TimeUnit {
    type Err = ChatgramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" | "automatic" => Ok(TimeUnit::Automatic),
            "day" => Ok(TimeUnit::Day),
            "month" => Ok(TimeUnit::Month),
            "year" => Ok(TimeUnit::Year),
            _ => Err(ChatgramError::invalid_format(
                "time unit",
                format!("'{s}' (expected automatic, day, month or year)"),
            )),
        }
    }
}

/// Unit a series is actually bucketed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BucketUnit {
    Day,
    Month,
    Year,
}

impl BucketUnit {
    /// Lowercase name used in output files.
    pub fn as_str(self) -> &'static str {
        match self {
            BucketUnit::Day => "day",
            BucketUnit::Month => "month",
            BucketUnit::Year => "year",
        }
    }
}

impl fmt::Display for BucketUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BucketUnit::Day => "Day",
            BucketUnit::Month => "Month",
            BucketUnit::Year => "Year",
        };
        f.write_str(label)
    }
}

impl From<BucketUnit> for TimeUnit {
    fn from(unit: BucketUnit) -> Self {
        match unit {
            BucketUnit::Day => TimeUnit::Day,
            BucketUnit::Month => TimeUnit::Month,
            BucketUnit::Year => TimeUnit::Year,
        }
    }
}

/// Whether empty buckets are part of a series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillMode {
    /// Every bucket between the range bounds, zero when nothing was sent.
    #[default]
    Dense,
    /// Only buckets with at least one message.
    Sparse,
}

/// One histogram bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bucket {
    pub key: i64,
    pub count: u64,
}

/// Message counts of one chat, sorted by bucket key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistogramSeries {
    name: String,
    unit: BucketUnit,
    buckets: Vec<Bucket>,
}

impl HistogramSeries {
    /// Name of the chat the series was built from.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit(&self) -> BucketUnit {
        self.unit
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    /// Bucket counts in key order.
    pub fn counts(&self) -> impl Iterator<Item = u64> + '_ {
        self.buckets.iter().map(|b| b.count)
    }

    /// Sum of all bucket counts.
    pub fn total(&self) -> u64 {
        self.counts().sum()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// First day covered by `bucket`.
    pub fn start_of(&self, bucket: &Bucket) -> Option<NaiveDate> {
        bucket_start(self.unit, bucket.key)
    }
}

// ============================================================================
// Bucketing
// ============================================================================

/// Resolves the configured unit for a range.
///
/// Fixed units are returned as-is. [`TimeUnit::Automatic`] looks at the
/// number of whole days between the bounds: below
/// [`day_limit`](HistogramConfig::day_limit) it buckets by day, below
/// [`month_limit`](HistogramConfig::month_limit) by month, otherwise by year.
pub fn effective_unit(
    config: &HistogramConfig,
    lower: NaiveDateTime,
    upper: NaiveDateTime,
) -> BucketUnit {
    if let Some(unit) = config.unit.bucket_unit() {
        return unit;
    }

    let span = upper.signed_duration_since(lower).num_days();
    if span < config.day_limit {
        BucketUnit::Day
    } else if span < config.month_limit {
        BucketUnit::Month
    } else {
        BucketUnit::Year
    }
}

/// Key of the bucket containing `timestamp`.
pub fn bucket_key(unit: BucketUnit, timestamp: NaiveDateTime) -> i64 {
    let date = timestamp.date();
    match unit {
        BucketUnit::Day => i64::from(date.num_days_from_ce()) - UNIX_EPOCH_DAYS_FROM_CE,
        BucketUnit::Month => i64::from(date.year()) * 12 + i64::from(date.month0()),
        BucketUnit::Year => i64::from(date.year()),
    }
}

/// First day of the bucket identified by `key`.
///
/// Returns `None` if the key lies outside chrono's supported date range.
pub fn bucket_start(unit: BucketUnit, key: i64) -> Option<NaiveDate> {
    match unit {
        BucketUnit::Day => {
            let days = i32::try_from(key + UNIX_EPOCH_DAYS_FROM_CE).ok()?;
            NaiveDate::from_num_days_from_ce_opt(days)
        }
        BucketUnit::Month => {
            let year = i32::try_from(key.div_euclid(12)).ok()?;
            let month = key.rem_euclid(12) as u32 + 1;
            NaiveDate::from_ymd_opt(year, month, 1)
        }
        BucketUnit::Year => NaiveDate::from_ymd_opt(i32::try_from(key).ok()?, 1, 1),
    }
}

/// Builds the histogram of `chat` between two inclusive bounds.
///
/// Only messages with `lower <= timestamp <= upper` are counted. The result
/// is empty when `lower > upper`.
pub fn build_series(
    chat: &Chat,
    lower: NaiveDateTime,
    upper: NaiveDateTime,
    config: &HistogramConfig,
) -> HistogramSeries {
    let unit = effective_unit(config, lower, upper);
    let mut series = HistogramSeries {
        name: chat.name().to_string(),
        unit,
        buckets: Vec::new(),
    };
    if lower > upper {
        return series;
    }

    let mut counts: BTreeMap<i64, u64> = BTreeMap::new();
    for msg in chat.iter().filter(|m| (lower..=upper).contains(&m.timestamp())) {
        *counts.entry(bucket_key(unit, msg.timestamp())).or_insert(0) += 1;
    }

    series.buckets = match config.fill {
        FillMode::Sparse => counts
            .into_iter()
            .map(|(key, count)| Bucket { key, count })
            .collect(),
        FillMode::Dense => (bucket_key(unit, lower)..=bucket_key(unit, upper))
            .map(|key| Bucket {
                key,
                count: counts.get(&key).copied().unwrap_or(0),
            })
            .collect(),
    };
    series
}
