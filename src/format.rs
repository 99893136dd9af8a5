//! Output format types for chatgram.
//!
//! These types don't depend on CLI frameworks and can be used from library
//! code directly.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn example() -> chatgram::Result<()> {
//! use chatgram::format::{OutputFormat, write_to_format};
//! use chatgram::core::histogram::HistogramSeries;
//!
//! let series: Vec<HistogramSeries> = Vec::new();
//!
//! // Write using format enum
//! write_to_format(&series, "histogram.csv", OutputFormat::Csv)?;
//!
//! // Or use format detection from extension
//! let format = OutputFormat::from_path("histogram.jsonl")?;
//! assert_eq!(format, OutputFormat::Jsonl);
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::histogram::HistogramSeries;
use crate::error::ChatgramError;

/// Output format for histogram series.
///
/// ```rust
/// use chatgram::format::OutputFormat;
/// use std::str::FromStr;
///
/// let format = OutputFormat::from_str("jsonl").unwrap();
/// assert_eq!(format, OutputFormat::Jsonl);
/// assert_eq!(format.extension(), "jsonl");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    /// CSV with semicolon delimiter, one row per bucket (default)
    #[default]
    Csv,

    /// JSON array of series
    Json,

    /// JSON Lines, one series per line
    Jsonl,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
        }
    }

    /// Name of the cargo feature that enables this format's writer.
    pub fn feature(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv-output",
            OutputFormat::Json | OutputFormat::Jsonl => "json-output",
        }
    }

    /// Detects format from a file path based on extension.
    ///
    /// ```rust
    /// use chatgram::format::OutputFormat;
    ///
    /// let format = OutputFormat::from_path("out/histogram.json").unwrap();
    /// assert_eq!(format, OutputFormat::Json);
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ChatgramError> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            _ => Err(ChatgramError::invalid_format(
                "output",
                format!("Unknown file extension: '.{ext}'. Expected one of: csv, json, jsonl"),
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "CSV"),
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Jsonl => write!(f, "JSONL"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = ChatgramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            _ => Err(ChatgramError::invalid_format(
                "output",
                format!("Unknown format: '{s}'. Expected one of: csv, json, jsonl, ndjson"),
            )),
        }
    }
}

fn feature_disabled(format: OutputFormat) -> ChatgramError {
    ChatgramError::invalid_format(
        "output",
        format!(
            "Output format {} requires the '{}' feature to be enabled",
            format,
            format.feature()
        ),
    )
}

/// Writes series to a file in the specified format.
///
/// # Errors
///
/// Returns an error if:
/// - The required feature for the format is not enabled
/// - The file cannot be written
#[allow(unused_variables)]
pub fn write_to_format(
    series: &[HistogramSeries],
    path: impl AsRef<Path>,
    format: OutputFormat,
) -> Result<(), ChatgramError> {
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::write_csv(series, path),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::write_json(series, path),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::write_jsonl(series, path),
        #[allow(unreachable_patterns)]
        _ => Err(feature_disabled(format)),
    }
}

/// Converts series to a string in the specified format.
#[allow(unused_variables)]
pub fn to_format_string(
    series: &[HistogramSeries],
    format: OutputFormat,
) -> Result<String, ChatgramError> {
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::to_csv(series),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::to_json(series),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::to_jsonl(series),
        #[allow(unreachable_patterns)]
        _ => Err(feature_disabled(format)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_format_from_str() {
        assert_eq!(OutputFormat::from_str("csv").unwrap(), OutputFormat::Csv);
        assert_eq!(OutputFormat::from_str("json").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("jsonl").unwrap(), OutputFormat::Jsonl);
        assert_eq!(OutputFormat::from_str("ndjson").unwrap(), OutputFormat::Jsonl);
        assert_eq!(OutputFormat::from_str("CSV").unwrap(), OutputFormat::Csv);
        assert!(OutputFormat::from_str("png").unwrap_err().is_invalid_format());
    }

    #[test]
    fn test_format_from_str_lists_accepted_names() {
        let err = OutputFormat::from_str("xml").unwrap_err();
        assert!(err.to_string().contains("'xml'"));
        assert!(err.to_string().contains("csv, json, jsonl, ndjson"));
    }

    #[test]
    fn test_format_display() {
        assert_eq!(OutputFormat::Csv.to_string(), "CSV");
        assert_eq!(OutputFormat::Json.to_string(), "JSON");
        assert_eq!(OutputFormat::Jsonl.to_string(), "JSONL");
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(OutputFormat::from_path("histogram.csv").unwrap(), OutputFormat::Csv);
        assert_eq!(OutputFormat::from_path("a/b.ndjson").unwrap(), OutputFormat::Jsonl);
        assert_eq!(OutputFormat::from_path("/path/to/file.JSON").unwrap(), OutputFormat::Json);
        assert!(OutputFormat::from_path("histogram.png").is_err());
        assert!(OutputFormat::from_path("histogram").is_err());
    }

    #[test]
    fn test_format_features() {
        assert_eq!(OutputFormat::Csv.feature(), "csv-output");
        assert_eq!(OutputFormat::Jsonl.feature(), "json-output");
        assert_eq!(OutputFormat::default(), OutputFormat::Csv);
    }

    #[test]
    fn test_format_serde() {
        assert_eq!(serde_json::to_string(&OutputFormat::Jsonl).unwrap(), "\"jsonl\"");
        let parsed: OutputFormat = serde_json::from_str("\"csv\"").unwrap();
        assert_eq!(parsed, OutputFormat::Csv);
    }

    #[cfg(all(feature = "csv-output", feature = "json-output"))]
    #[test]
    fn test_to_format_string_dispatch() {
        let empty: Vec<HistogramSeries> = Vec::new();
        assert!(to_format_string(&empty, OutputFormat::Csv).unwrap().starts_with("Chat;Unit"));
        assert_eq!(to_format_string(&empty, OutputFormat::Json).unwrap(), "[]");
        assert_eq!(to_format_string(&empty, OutputFormat::Jsonl).unwrap(), "");
    }
}
