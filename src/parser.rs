//! Station file parsing for UK tide gauge records
//!
//! Each station file carries an 11-line header followed by one observation
//! per line, whitespace-delimited into `Cycle Date Time Value Residual`
//! fields. The `Value` field may carry a trailing sentinel letter (M, N or
//! T) that disqualifies the observation; such readings are kept in the
//! output series as explicit gaps rather than dropped.

use std::fs;
use std::path::Path;

use chrono::NaiveDateTime;
use tracing::debug;

use crate::constants::{DATETIME_FORMAT, FIELD_COUNT, HEADER_LINE_COUNT, SENTINEL_FLAGS};
use crate::series::{Reading, Series};
use crate::{Error, Result};

/// Parse a station file from disk.
///
/// The file name is carried into any parse error for context.
pub fn parse_station_file(path: &Path) -> Result<Series> {
    let text = fs::read_to_string(path)
        .map_err(|e| Error::io(format!("failed to read '{}'", path.display()), e))?;
    parse_station_text(&text, &path.display().to_string())
}

/// Parse the raw text of one station file into a series.
///
/// The output preserves file order and is not deduplicated; missing
/// readings are retained so downstream contiguity analysis can see the
/// gaps.
pub fn parse_station_text(text: &str, file: &str) -> Result<Series> {
    let mut readings = Vec::new();

    for (index, line) in text.lines().enumerate().skip(HEADER_LINE_COUNT) {
        let line_number = index + 1;
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != FIELD_COUNT {
            return Err(Error::parse(
                file,
                line_number,
                format!("expected {} fields, found {}", FIELD_COUNT, fields.len()),
            ));
        }

        // Cycle (fields[0]) and Residual (fields[4]) are not used.
        let timestamp = parse_timestamp(fields[1], fields[2], file, line_number)?;
        let value = parse_value(fields[3], file, line_number)?;

        readings.push(Reading { timestamp, value });
    }

    debug!(
        file,
        readings = readings.len(),
        "parsed station file"
    );
    Ok(Series::new(readings))
}

/// Combine the Date and Time fields into a UTC timestamp.
fn parse_timestamp(
    date: &str,
    time: &str,
    file: &str,
    line_number: usize,
) -> Result<chrono::DateTime<chrono::Utc>> {
    let combined = format!("{} {}", date, time);
    let naive = NaiveDateTime::parse_from_str(&combined, DATETIME_FORMAT).map_err(|e| {
        Error::parse(
            file,
            line_number,
            format!("invalid date/time '{}': {}", combined, e),
        )
    })?;
    Ok(naive.and_utc())
}

/// Parse the Value field, honoring sentinel flag suffixes.
///
/// A value ending in M, N or T is missing regardless of its numeric
/// prefix. Anything else must parse as a float.
fn parse_value(raw: &str, file: &str, line_number: usize) -> Result<Option<f64>> {
    if raw.ends_with(SENTINEL_FLAGS) {
        return Ok(None);
    }

    raw.parse::<f64>()
        .map(Some)
        .map_err(|_| Error::parse(file, line_number, format!("invalid sea level value '{}'", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    /// Minimal station file: 11 header lines then data lines.
    fn station_file(data_lines: &[&str]) -> String {
        let mut text = String::new();
        for i in 0..HEADER_LINE_COUNT {
            text.push_str(&format!("Header line {}\n", i + 1));
        }
        for line in data_lines {
            text.push_str(line);
            text.push('\n');
        }
        text
    }

    #[test]
    fn parses_plain_values() {
        let text = station_file(&[
            "1) 1947/01/01 00:00:00 3.3216 0.1111",
            "2) 1947/01/01 01:00:00 2.9870 -0.0043",
        ]);

        let series = parse_station_text(&text, "test.txt").unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(
            series.readings()[0].timestamp,
            Utc.with_ymd_and_hms(1947, 1, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(series.readings()[0].value, Some(3.3216));
        assert_eq!(series.readings()[1].value, Some(2.9870));
    }

    #[test]
    fn sentinel_suffix_means_missing() {
        // Numeric prefix is irrelevant once a flag is attached
        let text = station_file(&[
            "1) 1947/01/01 00:00:00 -99.0000M 0.0000",
            "2) 1947/01/01 01:00:00 3.1200N 0.0000",
            "3) 1947/01/01 02:00:00 2.5000T 0.0000",
            "4) 1947/01/01 03:00:00 2.5000 0.0000",
        ]);

        let series = parse_station_text(&text, "test.txt").unwrap();
        assert_eq!(series.len(), 4);
        assert_eq!(series.readings()[0].value, None);
        assert_eq!(series.readings()[1].value, None);
        assert_eq!(series.readings()[2].value, None);
        assert_eq!(series.readings()[3].value, Some(2.5));
        assert_eq!(series.present_count(), 1);
    }

    #[test]
    fn header_lines_are_skipped() {
        // Header lines would not parse as records; they must be ignored
        let text = station_file(&["1) 1947/01/01 00:00:00 1.0 0.0"]);
        let series = parse_station_text(&text, "test.txt").unwrap();
        assert_eq!(series.len(), 1);
    }

    #[test]
    fn wrong_field_count_is_an_error() {
        let text = station_file(&["1) 1947/01/01 00:00:00 3.3216"]);
        let err = parse_station_text(&text, "test.txt").unwrap_err();
        match err {
            Error::Parse { line, .. } => assert_eq!(line, HEADER_LINE_COUNT + 1),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn bad_datetime_is_an_error() {
        let text = station_file(&["1) 1947/13/01 00:00:00 3.3216 0.1111"]);
        assert!(matches!(
            parse_station_text(&text, "test.txt"),
            Err(Error::Parse { .. })
        ));
    }

    #[test]
    fn unflagged_garbage_value_is_an_error() {
        let text = station_file(&["1) 1947/01/01 00:00:00 not-a-number 0.1111"]);
        assert!(matches!(
            parse_station_text(&text, "test.txt"),
            Err(Error::Parse { .. })
        ));
    }

    #[test]
    fn blank_lines_are_ignored() {
        let text = station_file(&["1) 1947/01/01 00:00:00 1.0 0.0", "", "  "]);
        let series = parse_station_text(&text, "test.txt").unwrap();
        assert_eq!(series.len(), 1);
    }
}
