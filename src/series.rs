//! Core data model for tide gauge observations
//!
//! A station file parses into a [`Series`] of [`Reading`]s. Readings keep
//! their timestamp and value paired through every transformation, so
//! filtering missing observations can never misalign times and values.

use chrono::{DateTime, Utc};

use crate::{Error, Result};

/// A single tide gauge observation.
///
/// The value is `None` when the source record carried a disqualifying
/// sentinel flag or no usable number. Readings are immutable once parsed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    /// Observation time (gauge records are reported in UTC)
    pub timestamp: DateTime<Utc>,
    /// Sea level in metres, `None` for a disqualified observation
    pub value: Option<f64>,
}

impl Reading {
    /// Create a reading with a valid sea level value.
    pub fn present(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self {
            timestamp,
            value: Some(value),
        }
    }

    /// Create a reading flagged as missing.
    pub fn missing(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            value: None,
        }
    }

    /// Whether this reading carries a usable value.
    pub fn is_present(&self) -> bool {
        self.value.is_some()
    }
}

/// An ordered sequence of readings.
///
/// Series produced by [`crate::combine`] are strictly sorted by timestamp
/// with no duplicates. Missing readings are retained explicitly; they are
/// only dropped inside the analyses that cannot use them, so the
/// contiguity scan always sees the gaps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    readings: Vec<Reading>,
}

impl Series {
    /// Create a series from readings, preserving their order.
    pub fn new(readings: Vec<Reading>) -> Self {
        Self { readings }
    }

    /// Number of readings, missing included.
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    /// Check whether the series has no readings at all.
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// All readings in order.
    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    /// Iterate over readings in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Reading> {
        self.readings.iter()
    }

    /// Number of readings with a usable value.
    pub fn present_count(&self) -> usize {
        self.readings.iter().filter(|r| r.is_present()).count()
    }

    /// Readings with a usable value, in order.
    pub fn present(&self) -> impl Iterator<Item = (DateTime<Utc>, f64)> + '_ {
        self.readings
            .iter()
            .filter_map(|r| r.value.map(|v| (r.timestamp, v)))
    }

    /// Mean of the present values, `None` when every reading is missing.
    pub fn present_mean(&self) -> Option<f64> {
        let mut sum = 0.0;
        let mut count = 0usize;
        for (_, value) in self.present() {
            sum += value;
            count += 1;
        }
        if count == 0 {
            None
        } else {
            Some(sum / count as f64)
        }
    }

    /// Timestamp of the first reading.
    pub fn first_timestamp(&self) -> Option<DateTime<Utc>> {
        self.readings.first().map(|r| r.timestamp)
    }

    /// Timestamp of the last reading.
    pub fn last_timestamp(&self) -> Option<DateTime<Utc>> {
        self.readings.last().map(|r| r.timestamp)
    }

    /// Timestamp of the first present reading.
    pub fn first_present_timestamp(&self) -> Option<DateTime<Utc>> {
        self.present().next().map(|(ts, _)| ts)
    }
}

impl IntoIterator for Series {
    type Item = Reading;
    type IntoIter = std::vec::IntoIter<Reading>;

    fn into_iter(self) -> Self::IntoIter {
        self.readings.into_iter()
    }
}

/// A closed timestamp interval used for slicing a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Interval {
    /// Create an interval, rejecting a start after the end.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start > end {
            return Err(Error::configuration(format!(
                "interval start {} is after end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// Whether a timestamp falls within the closed interval.
    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        timestamp >= self.start && timestamp <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(1947, 1, 1, hour, 0, 0).unwrap()
    }

    #[test]
    fn present_mean_ignores_missing() {
        let series = Series::new(vec![
            Reading::present(ts(0), 1.0),
            Reading::missing(ts(1)),
            Reading::present(ts(2), 3.0),
        ]);

        assert_eq!(series.len(), 3);
        assert_eq!(series.present_count(), 2);
        assert!((series.present_mean().unwrap() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn present_mean_of_all_missing_is_none() {
        let series = Series::new(vec![Reading::missing(ts(0)), Reading::missing(ts(1))]);
        assert_eq!(series.present_mean(), None);
    }

    #[test]
    fn first_present_timestamp_skips_gaps() {
        let series = Series::new(vec![
            Reading::missing(ts(0)),
            Reading::present(ts(1), 2.5),
        ]);
        assert_eq!(series.first_present_timestamp(), Some(ts(1)));
    }

    #[test]
    fn interval_rejects_reversed_bounds() {
        assert!(Interval::new(ts(2), ts(1)).is_err());

        let interval = Interval::new(ts(1), ts(3)).unwrap();
        assert!(interval.contains(ts(1)));
        assert!(interval.contains(ts(3)));
        assert!(!interval.contains(ts(4)));
    }
}
