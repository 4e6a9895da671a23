//! Interval extraction and demeaning
//!
//! Slices a series to a closed interval and subtracts the mean of the
//! present values, so the harmonic fit sees a signal oscillating around
//! zero. Missing readings stay missing; they are never zero-filled.

use crate::series::{Interval, Reading, Series};
use crate::{Error, Result};

/// Extract the readings inside `interval` and demean the present values.
///
/// Fails with an empty-range error when the interval selects no readings,
/// or selects only missing ones (the mean is undefined either way).
pub fn extract_and_demean(series: &Series, interval: Interval) -> Result<Series> {
    let selected: Vec<Reading> = series
        .iter()
        .filter(|r| interval.contains(r.timestamp))
        .copied()
        .collect();

    let selected = Series::new(selected);
    let mean = selected
        .present_mean()
        .ok_or_else(|| Error::empty_range(interval.start, interval.end))?;

    let demeaned = selected
        .into_iter()
        .map(|r| Reading {
            timestamp: r.timestamp,
            value: r.value.map(|v| v - mean),
        })
        .collect();

    Ok(Series::new(demeaned))
}
