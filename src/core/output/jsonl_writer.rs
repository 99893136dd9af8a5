//! JSON Lines (JSONL) output writer.
//!
//! Each chat's series is one line, so consumers can read one chat at a time.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::SeriesRecord;
use crate::core::histogram::HistogramSeries;
use crate::error::Result;

/// Writes series to JSONL (JSON Lines) format.
///
/// Each line is a valid JSON object:
/// ```jsonl
/// {"chat":"Family","unit":"day","total":1,"buckets":[{"key":19723,"start":"2024-01-01","count":1}]}
/// {"chat":"Work","unit":"day","total":0,"buckets":[{"key":19723,"start":"2024-01-01","count":0}]}
/// ```
pub fn write_jsonl(series: &[HistogramSeries], output_path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    write_lines(series, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Converts series to a JSONL string.
pub fn to_jsonl(series: &[HistogramSeries]) -> Result<String> {
    let mut buffer = Vec::new();
    write_lines(series, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

fn write_lines<W: Write>(series: &[HistogramSeries], writer: &mut W) -> Result<()> {
    for s in series {
        let line = serde_json::to_string(&SeriesRecord::from_series(s))?;
        writeln!(writer, "{line}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Chat;
    use crate::Message;
    use crate::config::HistogramConfig;
    use crate::core::histogram::{TimeUnit, build_series};
    use chrono::NaiveDate;
    use std::io::{BufRead, BufReader};
    use tempfile::NamedTempFile;

    fn two_series() -> Vec<HistogramSeries> {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let lower = day.and_hms_opt(0, 0, 0).unwrap();
        let upper = day.and_hms_opt(23, 59, 59).unwrap();
        let config = HistogramConfig::new().with_unit(TimeUnit::Day);

        let family = Chat::new("Family", vec![Message::new("A", "x", lower)]);
        let work = Chat::new("Work", Vec::new());
        vec![
            build_series(&family, lower, upper, &config),
            build_series(&work, lower, upper, &config),
        ]
    }

    #[test]
    fn test_write_jsonl_one_line_per_series() {
        let temp_file = NamedTempFile::new().unwrap();
        write_jsonl(&two_series(), temp_file.path()).unwrap();

        let file = std::fs::File::open(temp_file.path()).unwrap();
        let lines: Vec<String> = BufReader::new(file).lines().map(|l| l.unwrap()).collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(first["chat"], "Family");
        assert_eq!(first["total"], 1);

        let second: serde_json::Value = serde_json::from_str(&lines[1]).unwrap();
        assert_eq!(second["chat"], "Work");
        assert_eq!(second["buckets"][0]["count"], 0);
    }

    #[test]
    fn test_jsonl_no_array_brackets() {
        let content = to_jsonl(&two_series()).unwrap();
        assert!(!content.starts_with('['));
        assert!(content.ends_with('\n'));
    }
}
