//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`OutputFormat`] - Output format options
//! - [`UnitArg`] - Histogram time unit options
//!
//! `Args` converts into the library's own configuration types, so the binary
//! holds no histogram logic:
//!
//! ```rust
//! use clap::Parser;
//! use chatgram::cli::Args;
//! use chatgram::core::histogram::{FillMode, TimeUnit};
//!
//! let args = Args::parse_from(["chatgram", "result.json", "-u", "month", "--sparse"]);
//! let config = args.histogram_config();
//!
//! assert_eq!(config.unit, TimeUnit::Month);
//! assert_eq!(config.fill, FillMode::Sparse);
//! ```

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::HistogramConfig;
use crate::core::filter::{ChatSelection, DateRange};
use crate::core::histogram::TimeUnit;
use crate::error::Result;

/// Output path used when `-o` is not given.
pub const DEFAULT_OUTPUT: &str = "histogram.csv";

/// Count messages per day, month or year in a Telegram export
/// and write one histogram series per chat.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatgram")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatgram result.json
    chatgram result.json -u month -o monthly.csv
    chatgram result.json --from 2024-01-01 --to 2024-06-30 --chat Family
    chatgram result.json -f json --sparse
    chatgram result.json --summary")]
pub struct Args {
    /// Path to the Telegram export (result.json)
    pub input: String,

    /// Path to output file
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: OutputFormat,

    /// Histogram time unit
    #[arg(short, long, value_enum, default_value = "auto")]
    pub unit: UnitArg,

    /// Omit buckets without messages
    #[arg(long)]
    pub sparse: bool,

    /// First day to include (YYYY-MM-DD), defaults to the oldest message
    #[arg(long, value_name = "DATE")]
    pub from: Option<String>,

    /// Last day to include (YYYY-MM-DD), defaults to the newest message
    #[arg(long, value_name = "DATE")]
    pub to: Option<String>,

    /// Only include this chat (repeatable)
    #[arg(long = "chat", value_name = "NAME")]
    pub chats: Vec<String>,

    /// Print the import summary without writing a file
    #[arg(long)]
    pub summary: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Histogram settings from `--unit` and `--sparse`.
    pub fn histogram_config(&self) -> HistogramConfig {
        HistogramConfig::new()
            .with_unit(self.unit.into())
            .with_sparse(self.sparse)
    }

    /// Date range from `--from` and `--to`.
    pub fn date_range(&self) -> Result<DateRange> {
        let mut range = DateRange::new();
        if let Some(ref from) = self.from {
            range = range.with_from(from)?;
        }
        if let Some(ref to) = self.to {
            range = range.with_to(to)?;
        }
        Ok(range)
    }

    /// Chat selection from `--chat`.
    pub fn selection(&self) -> ChatSelection {
        if self.chats.is_empty() {
            ChatSelection::all()
        } else {
            ChatSelection::only(self.chats.iter().cloned())
        }
    }

    /// Output path; a default path takes the extension of the format.
    pub fn output_path(&self) -> String {
        if self.output != DEFAULT_OUTPUT {
            return self.output.clone();
        }
        let format: crate::format::OutputFormat = self.format.into();
        format!("histogram.{}", format.extension())
    }
}

/// Output format options.
///
/// - [`Csv`](OutputFormat::Csv) - One row per bucket, semicolon delimiter
/// - [`Json`](OutputFormat::Json) - Array of series, for web charting
/// - [`Jsonl`](OutputFormat::Jsonl) - One series per line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// CSV with semicolon delimiter (default)
    #[default]
    Csv,

    /// JSON array of series
    Json,

    /// JSON Lines - one series per line
    #[value(alias = "ndjson")]
    Jsonl,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        crate::format::OutputFormat::from(*self).fmt(f)
    }
}

// Conversion to library format type
impl From<OutputFormat> for crate::format::OutputFormat {
    fn from(format: OutputFormat) -> crate::format::OutputFormat {
        match format {
            OutputFormat::Csv => crate::format::OutputFormat::Csv,
            OutputFormat::Json => crate::format::OutputFormat::Json,
            OutputFormat::Jsonl => crate::format::OutputFormat::Jsonl,
        }
    }
}

/// Histogram time unit options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitArg {
    /// Pick day, month or year from the width of the range
    #[default]
    #[value(alias = "automatic")]
    Auto,
    Day,
    Month,
    Year,
}

impl From<UnitArg> for TimeUnit {
    fn from(unit: UnitArg) -> TimeUnit {
        match unit {
            UnitArg::Auto => TimeUnit::Automatic,
            UnitArg::Day => TimeUnit::Day,
            UnitArg::Month => TimeUnit::Month,
            UnitArg::Year => TimeUnit::Year,
        }
    }
}
