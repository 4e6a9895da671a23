//! Merging per-file series into one station record
//!
//! Station data arrives as one file per year with possibly-overlapping
//! coverage. The combiner concatenates the inputs, stable-sorts by
//! timestamp and drops duplicate timestamps, keeping the first-seen
//! reading (input order, then file order within an input). Missing
//! readings pass through untouched.

use tracing::debug;

use crate::series::Series;

/// Merge any number of series into one time-sorted series.
///
/// Duplicate timestamps resolve first-seen wins: the reading from the
/// earliest input (and earliest position within that input) is kept.
pub fn combine<I>(series_list: I) -> Series
where
    I: IntoIterator<Item = Series>,
{
    let mut readings: Vec<_> = series_list
        .into_iter()
        .flat_map(|series| series.into_iter())
        .collect();

    let before = readings.len();

    // Stable sort keeps equal timestamps in input order, so dedup
    // retains the first-seen reading.
    readings.sort_by_key(|r| r.timestamp);
    readings.dedup_by_key(|r| r.timestamp);

    if readings.len() != before {
        debug!(
            duplicates = before - readings.len(),
            "dropped duplicate timestamps during combine"
        );
    }

    Series::new(readings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::Reading;
    use chrono::{DateTime, TimeZone, Utc};

    fn ts(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(1947, 1, 1, hour, 0, 0).unwrap()
    }

    #[test]
    fn output_is_time_sorted() {
        let a = Series::new(vec![Reading::present(ts(3), 3.0)]);
        let b = Series::new(vec![
            Reading::present(ts(1), 1.0),
            Reading::present(ts(2), 2.0),
        ]);

        let combined = combine([a, b]);
        let times: Vec<_> = combined.iter().map(|r| r.timestamp).collect();
        assert_eq!(times, vec![ts(1), ts(2), ts(3)]);
    }

    #[test]
    fn disjoint_ranges_are_order_independent() {
        let early = Series::new(vec![
            Reading::present(ts(0), 1.0),
            Reading::missing(ts(1)),
        ]);
        let late = Series::new(vec![
            Reading::present(ts(2), 3.0),
            Reading::present(ts(3), 4.0),
        ]);

        let forward = combine([early.clone(), late.clone()]);
        let reversed = combine([late, early]);
        assert_eq!(forward, reversed);
    }

    #[test]
    fn duplicate_timestamps_first_seen_wins() {
        let first = Series::new(vec![Reading::present(ts(1), 1.5)]);
        let second = Series::new(vec![Reading::present(ts(1), 9.9)]);

        let combined = combine([first, second]);
        assert_eq!(combined.len(), 1);
        assert_eq!(combined.readings()[0].value, Some(1.5));
    }

    #[test]
    fn missing_readings_are_not_filtered() {
        let a = Series::new(vec![Reading::missing(ts(0)), Reading::present(ts(1), 2.0)]);
        let combined = combine([a]);
        assert_eq!(combined.len(), 2);
        assert_eq!(combined.readings()[0].value, None);
    }

    #[test]
    fn combining_a_series_with_itself_is_idempotent() {
        let series = Series::new(vec![
            Reading::present(ts(0), 1.0),
            Reading::present(ts(1), 2.0),
        ]);

        let combined = combine([series.clone(), series.clone()]);
        assert_eq!(combined, series);
    }
}
