//! Statistical analyses over a combined station series
//!
//! Each analysis consumes the series read-only and produces its own
//! result record:
//! - [`extract_and_demean`] slices an interval and centres its values
//! - [`sea_level_trend`] fits the long-term linear trend with a t-test
//! - [`harmonic_analysis`] fits amplitude/phase per tidal constituent
//! - [`longest_run`] locates the longest gap-free stretch of readings

mod contiguity;
mod harmonic;
mod range;
mod trend;

pub use contiguity::{longest_run, LongestRun};
pub use harmonic::{
    harmonic_analysis, lookup_constituent, Constituent, ConstituentFit, HarmonicResult,
    CONSTITUENTS,
};
pub use range::extract_and_demean;
pub use trend::{sea_level_trend, TrendResult};

use std::f64::consts::PI;

/// Wrap a phase angle to the range [0, 2π).
pub fn wrap_phase(phase: f64) -> f64 {
    let mut p = phase % (2.0 * PI);
    if p < 0.0 {
        p += 2.0 * PI;
    }
    p
}
