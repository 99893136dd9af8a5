//! Configuration types for histogram building.
//!
//! This module provides plain configuration structs for library usage,
//! without any CLI framework dependencies.
//!
//! # Example
//!
//! ```rust
//! use chatgram::config::HistogramConfig;
//! use chatgram::core::histogram::{FillMode, TimeUnit};
//!
//! let config = HistogramConfig::new()
//!     .with_unit(TimeUnit::Month)
//!     .with_fill(FillMode::Sparse);
//!
//! assert_eq!(config.unit, TimeUnit::Month);
//! ```

use serde::{Deserialize, Serialize};

use crate::core::histogram::{FillMode, TimeUnit};

/// Configuration for [`build_series`](crate::core::histogram::build_series).
///
/// The automatic unit buckets by day for ranges shorter than `day_limit`
/// days, by month for ranges shorter than `month_limit` days, and by year
/// otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistogramConfig {
    /// Requested time unit (default: automatic)
    pub unit: TimeUnit,

    /// Whether empty buckets are emitted (default: dense)
    pub fill: FillMode,

    /// Ranges shorter than this many days use daily buckets (default: 150)
    pub day_limit: i64,

    /// Ranges shorter than this many days use monthly buckets (default: 1825)
    pub month_limit: i64,
}

impl Default for HistogramConfig {
    fn default() -> Self {
        Self {
            unit: TimeUnit::Automatic,
            fill: FillMode::Dense,
            day_limit: 5 * 30,
            month_limit: 5 * 365,
        }
    }
}

impl HistogramConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the time unit.
    #[must_use]
    pub fn with_unit(mut self, unit: TimeUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Sets the fill mode.
    #[must_use]
    pub fn with_fill(mut self, fill: FillMode) -> Self {
        self.fill = fill;
        self
    }

    /// Shorthand for `with_fill(FillMode::Sparse)` when `sparse` is true.
    #[must_use]
    pub fn with_sparse(self, sparse: bool) -> Self {
        self.with_fill(if sparse { FillMode::Sparse } else { FillMode::Dense })
    }

    /// Sets the span limits used by the automatic unit, in days.
    #[must_use]
    pub fn with_automatic_limits(mut self, day_limit: i64, month_limit: i64) -> Self {
        self.day_limit = day_limit;
        self.month_limit = month_limit;
        self
    }
}
