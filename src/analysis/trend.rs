//! Long-term sea-level trend estimation
//!
//! Ordinary least-squares regression of sea level against elapsed time in
//! days, with a two-sided Student-t test of the null hypothesis that the
//! slope is zero. Elapsed time is measured from the first valid reading;
//! the epoch choice only scales the intercept, never the significance.

use statrs::distribution::{ContinuousCDF, StudentsT};
use tracing::debug;

use crate::constants::SECONDS_PER_DAY;
use crate::series::Series;
use crate::{Error, Result};

/// Minimum valid readings for a trend fit: the t-test needs n - 2 >= 1.
const MIN_TREND_READINGS: usize = 3;

/// Linear sea-level trend over a series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendResult {
    /// Regression slope in metres per day
    pub slope: f64,
    /// Two-sided p-value for slope = 0
    pub p_value: f64,
}

/// Fit the sea-level trend of a series.
///
/// Missing readings are dropped; the remaining (timestamp, value) pairs
/// stay paired through the filter, so times and values cannot drift out
/// of alignment.
pub fn sea_level_trend(series: &Series) -> Result<TrendResult> {
    let valid: Vec<_> = series.present().collect();
    let n = valid.len();
    if n < MIN_TREND_READINGS {
        return Err(Error::insufficient_data(
            "trend estimation",
            MIN_TREND_READINGS,
            n,
        ));
    }

    let epoch = valid[0].0;
    let days: Vec<f64> = valid
        .iter()
        .map(|(ts, _)| (*ts - epoch).num_seconds() as f64 / SECONDS_PER_DAY)
        .collect();
    let levels: Vec<f64> = valid.iter().map(|(_, v)| *v).collect();

    let x_mean = days.iter().sum::<f64>() / n as f64;
    let y_mean = levels.iter().sum::<f64>() / n as f64;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for (x, y) in days.iter().zip(levels.iter()) {
        sxx += (x - x_mean) * (x - x_mean);
        sxy += (x - x_mean) * (y - y_mean);
    }

    // All readings at the same instant: no time axis to regress against
    if sxx <= f64::EPSILON {
        return Err(Error::insufficient_data(
            "trend estimation (degenerate time axis)",
            MIN_TREND_READINGS,
            1,
        ));
    }

    let slope = sxy / sxx;
    let intercept = y_mean - slope * x_mean;

    let sse: f64 = days
        .iter()
        .zip(levels.iter())
        .map(|(x, y)| {
            let residual = y - (intercept + slope * x);
            residual * residual
        })
        .sum();

    let dof = (n - 2) as f64;
    let standard_error = (sse / dof / sxx).sqrt();

    let p_value = if standard_error <= f64::EPSILON {
        // Perfect fit: a nonzero slope is unambiguous, a zero slope is flat
        if slope.abs() <= f64::EPSILON {
            1.0
        } else {
            0.0
        }
    } else {
        let t_statistic = slope / standard_error;
        let distribution = StudentsT::new(0.0, 1.0, dof)
            .map_err(|e| Error::configuration(format!("t-distribution setup failed: {}", e)))?;
        2.0 * (1.0 - distribution.cdf(t_statistic.abs()))
    };

    debug!(n, slope, p_value, "fitted sea-level trend");
    Ok(TrendResult { slope, p_value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::Reading;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(1946, 1, 1, 0, 0, 0).unwrap()
    }

    fn hourly_series(values: impl IntoIterator<Item = Option<f64>>) -> Series {
        let readings = values
            .into_iter()
            .enumerate()
            .map(|(i, v)| Reading {
                timestamp: base() + Duration::hours(i as i64),
                value: v,
            })
            .collect();
        Series::new(readings)
    }

    #[test]
    fn recovers_exact_linear_slope() {
        // value = 0.002 m/day * t + 1.5, sampled hourly over 100 days
        let k = 0.002;
        let readings: Vec<_> = (0..2400)
            .map(|i| {
                let days = i as f64 / 24.0;
                Reading::present(base() + Duration::hours(i), k * days + 1.5)
            })
            .collect();

        let result = sea_level_trend(&Series::new(readings)).unwrap();
        assert!((result.slope - k).abs() < 1e-9, "slope = {}", result.slope);
        assert!(result.p_value < 1e-6, "p = {}", result.p_value);
    }

    #[test]
    fn noisy_flat_series_is_not_significant() {
        // Deterministic zero-mean wiggle with no drift
        let values = (0..240).map(|i| Some(if i % 2 == 0 { 0.05 } else { -0.05 }));
        let result = sea_level_trend(&hourly_series(values)).unwrap();
        assert!(result.p_value > 0.05, "p = {}", result.p_value);
    }

    #[test]
    fn missing_readings_are_excluded() {
        // Gaps between linear samples must not disturb the fit
        let k = 0.01;
        let values = (0..240).map(|i| {
            if i % 5 == 0 {
                None
            } else {
                Some(k * (i as f64 / 24.0))
            }
        });

        let result = sea_level_trend(&hourly_series(values)).unwrap();
        assert!((result.slope - k).abs() < 1e-9);
    }

    #[test]
    fn too_few_valid_readings_is_an_error() {
        let series = hourly_series([Some(1.0), Some(2.0), None]);
        assert!(matches!(
            sea_level_trend(&series),
            Err(Error::InsufficientData { .. })
        ));
    }

    #[test]
    fn degenerate_time_axis_is_an_error() {
        let ts = base();
        let series = Series::new(vec![
            Reading::present(ts, 1.0),
            Reading::present(ts, 2.0),
            Reading::present(ts, 3.0),
        ]);
        assert!(matches!(
            sea_level_trend(&series),
            Err(Error::InsufficientData { .. })
        ));
    }

    #[test]
    fn perfectly_flat_series_reports_no_trend() {
        let values = (0..48).map(|_| Some(2.0));
        let result = sea_level_trend(&hourly_series(values)).unwrap();
        assert!(result.slope.abs() < 1e-12);
        assert!((result.p_value - 1.0).abs() < 1e-12);
    }
}
