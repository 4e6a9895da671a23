//! Longest contiguous run of valid observations
//!
//! Scans a series with its gaps intact and reports the longest maximal
//! stretch of consecutive present readings. Ties resolve to the earliest
//! run in time order.

use crate::series::Series;

/// The longest run of present readings, as inclusive indices into the
/// series' reading order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LongestRun {
    pub start: usize,
    pub end: usize,
}

#[allow(clippy::len_without_is_empty)] // a run always holds at least one reading
impl LongestRun {
    /// Number of readings in the run.
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }
}

/// Find the longest run of consecutive present readings.
///
/// Returns `None` when the series is empty or every reading is missing;
/// there is no span to report in that case, and indices like (0, 0) would
/// masquerade as one.
pub fn longest_run(series: &Series) -> Option<LongestRun> {
    let mut best: Option<LongestRun> = None;
    let mut current_start: Option<usize> = None;

    for (index, reading) in series.iter().enumerate() {
        if reading.is_present() {
            if current_start.is_none() {
                current_start = Some(index);
            }
        } else if let Some(start) = current_start.take() {
            best = longer(best, LongestRun { start, end: index - 1 });
        }
    }
    if let Some(start) = current_start {
        best = longer(
            best,
            LongestRun {
                start,
                end: series.len() - 1,
            },
        );
    }

    best
}

/// Keep the longer run; on equal length the earlier one wins.
fn longer(best: Option<LongestRun>, candidate: LongestRun) -> Option<LongestRun> {
    match best {
        Some(current) if current.len() >= candidate.len() => Some(current),
        _ => Some(candidate),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::Reading;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn series_from_mask(mask: &[bool]) -> Series {
        let base: DateTime<Utc> = Utc.with_ymd_and_hms(1947, 1, 1, 0, 0, 0).unwrap();
        let readings = mask
            .iter()
            .enumerate()
            .map(|(i, &present)| {
                let ts = base + Duration::hours(i as i64);
                if present {
                    Reading::present(ts, 1.0)
                } else {
                    Reading::missing(ts)
                }
            })
            .collect();
        Series::new(readings)
    }

    #[test]
    fn finds_interior_run() {
        // present, missing, present, present, present, missing
        let series = series_from_mask(&[true, false, true, true, true, false]);
        let run = longest_run(&series).unwrap();
        assert_eq!(run, LongestRun { start: 2, end: 4 });
        assert_eq!(run.len(), 3);
    }

    #[test]
    fn all_missing_has_no_run() {
        let series = series_from_mask(&[false, false, false]);
        assert_eq!(longest_run(&series), None);
    }

    #[test]
    fn empty_series_has_no_run() {
        assert_eq!(longest_run(&Series::default()), None);
    }

    #[test]
    fn all_present_spans_everything() {
        let series = series_from_mask(&[true, true, true, true]);
        assert_eq!(
            longest_run(&series),
            Some(LongestRun { start: 0, end: 3 })
        );
    }

    #[test]
    fn tie_goes_to_the_earliest_run() {
        let series = series_from_mask(&[true, true, false, true, true]);
        assert_eq!(
            longest_run(&series),
            Some(LongestRun { start: 0, end: 1 })
        );
    }

    #[test]
    fn run_at_series_end_is_counted() {
        let series = series_from_mask(&[true, false, true, true]);
        assert_eq!(
            longest_run(&series),
            Some(LongestRun { start: 2, end: 3 })
        );
    }

    #[test]
    fn single_reading_run() {
        let series = series_from_mask(&[false, true, false]);
        assert_eq!(
            longest_run(&series),
            Some(LongestRun { start: 1, end: 1 })
        );
    }
}
