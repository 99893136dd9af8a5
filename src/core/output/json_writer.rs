//! JSON output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use super::SeriesRecord;
use crate::core::histogram::HistogramSeries;
use crate::error::Result;

/// Writes series to a JSON file as an array.
///
/// # Format
/// ```json
/// [
///   {
///     "chat": "Family",
///     "unit": "day",
///     "total": 2,
///     "buckets": [
///       {"key": 19723, "start": "2024-01-01", "count": 1},
///       {"key": 19724, "start": "2024-01-02", "count": 1}
///     ]
///   }
/// ]
/// ```
pub fn write_json(series: &[HistogramSeries], output_path: impl AsRef<Path>) -> Result<()> {
    let json = to_json(series)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts series to a pretty-printed JSON array.
///
/// Same format as `write_json`, but returns a String instead of writing to file.
pub fn to_json(series: &[HistogramSeries]) -> Result<String> {
    let records: Vec<SeriesRecord<'_>> = series.iter().map(SeriesRecord::from_series).collect();
    Ok(serde_json::to_string_pretty(&records)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Chat;
    use crate::Message;
    use crate::config::HistogramConfig;
    use crate::core::histogram::{FillMode, TimeUnit, build_series};
    use chrono::NaiveDate;
    use tempfile::NamedTempFile;

    fn monthly() -> HistogramSeries {
        let at = |m, d| {
            NaiveDate::from_ymd_opt(2024, m, d)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap()
        };
        let chat = Chat::new(
            "Work",
            vec![
                Message::new("A", "x", at(1, 5)),
                Message::new("B", "y", at(3, 9)),
                Message::new("B", "z", at(3, 10)),
            ],
        );
        let config = HistogramConfig::new()
            .with_unit(TimeUnit::Month)
            .with_fill(FillMode::Sparse);
        build_series(&chat, at(1, 1), at(3, 31), &config)
    }

    #[test]
    fn test_write_json_array() {
        let temp_file = NamedTempFile::new().unwrap();
        write_json(&[monthly()], temp_file.path()).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();

        let first = &parsed[0];
        assert_eq!(first["chat"], "Work");
        assert_eq!(first["unit"], "month");
        assert_eq!(first["total"], 3);
        assert_eq!(first["buckets"].as_array().unwrap().len(), 2);
        assert_eq!(first["buckets"][0]["start"], "2024-01-01");
        assert_eq!(first["buckets"][1]["key"], 2024 * 12 + 2);
        assert_eq!(first["buckets"][1]["count"], 2);
    }

    #[test]
    fn test_to_json_empty() {
        assert_eq!(to_json(&[]).unwrap(), "[]");
    }
}
