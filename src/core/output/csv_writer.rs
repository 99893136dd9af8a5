//! CSV output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::core::histogram::HistogramSeries;
use crate::error::Result;

const HEADER: [&str; 5] = ["Chat", "Unit", "Bucket", "Start", "Count"];

/// Writes series to CSV with semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: `Chat`, `Unit`, `Bucket`, `Start`, `Count`
/// - One row per bucket; `Start` is the bucket's first day (`YYYY-MM-DD`)
/// - Encoding: UTF-8
pub fn write_csv(series: &[HistogramSeries], output_path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(output_path)?;
    write_records(series, file)
}

/// Converts series to a CSV string.
///
/// Same format as `write_csv`.
pub fn to_csv(series: &[HistogramSeries]) -> Result<String> {
    let mut buffer = Vec::new();
    write_records(series, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

fn write_records<W: Write>(series: &[HistogramSeries], sink: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(sink);
    writer.write_record(HEADER)?;

    for s in series {
        for bucket in s.buckets() {
            let key = bucket.key.to_string();
            let start = s
                .start_of(bucket)
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default();
            let count = bucket.count.to_string();
            writer.write_record([
                s.name(),
                s.unit().as_str(),
                key.as_str(),
                start.as_str(),
                count.as_str(),
            ])?;
        }
    }

    writer.flush()?;
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
    use tempfile::NamedTempFile;

    fn series() -> Vec<HistogramSeries> {
        let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
        let chat = Chat::new(
            "Family; and friends",
            vec![
                Message::new("A", "x", day(1).and_hms_opt(9, 0, 0).unwrap()),
                Message::new("A", "y", day(3).and_hms_opt(9, 0, 0).unwrap()),
            ],
        );
        let config = HistogramConfig::new().with_unit(TimeUnit::Day);
        vec![build_series(
            &chat,
            day(1).and_hms_opt(0, 0, 0).unwrap(),
            day(3).and_hms_opt(23, 59, 59).unwrap(),
            &config,
        )]
    }

    #[test]
    fn test_write_csv_basic() {
        let temp_file = NamedTempFile::new().unwrap();
        write_csv(&series(), temp_file.path()).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(lines[0], "Chat;Unit;Bucket;Start;Count");
        assert_eq!(lines.len(), 4);
        assert!(lines[1].ends_with(";day;19723;2024-01-01;1"));
        assert!(lines[2].ends_with(";day;19724;2024-01-02;0"));
    }

    #[test]
    fn test_csv_quotes_delimiter_in_name() {
        let csv = to_csv(&series()).unwrap();
        assert!(csv.contains("\"Family; and friends\";day;"));
    }

    #[test]
    fn test_to_csv_empty() {
        let csv = to_csv(&[]).unwrap();
        assert_eq!(csv.trim(), "Chat;Unit;Bucket;Start;Count");
    }
}
