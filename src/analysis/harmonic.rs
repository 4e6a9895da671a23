//! Harmonic analysis of tidal constituents
//!
//! Decomposes a demeaned sea-level series into amplitude and phase per
//! named constituent by least-squares fitting against the standard
//! astronomical frequencies:
//!
//! ```text
//! η(t) = Σᵢ [aᵢ cos(ωᵢt) + bᵢ sin(ωᵢt)]
//! ```
//!
//! rewritten as the linear system `y = X β` with two columns per
//! constituent. After solving:
//!
//! ```text
//! Hᵢ = √(aᵢ² + bᵢ²)        φᵢ = atan2(bᵢ, aᵢ)  in [0, 2π)
//! ```
//!
//! so the fitted signal per constituent is `Hᵢ·cos(ωᵢt − φᵢ)` with `t`
//! in seconds since the caller's reference instant. Phases are radians.

use chrono::{DateTime, Utc};
use faer::{linalg::solvers::Solve, Mat};
use std::f64::consts::PI;
use tracing::debug;

use super::wrap_phase;
use crate::series::Series;
use crate::{Error, Result};

/// A named tidal constituent with its astronomical period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constituent {
    pub name: &'static str,
    /// Period in hours
    pub period_hours: f64,
}

impl Constituent {
    /// Angular frequency ω = 2π/T in rad/s.
    pub fn angular_frequency(&self) -> f64 {
        2.0 * PI / (self.period_hours * 3600.0)
    }
}

/// Standard astronomical tidal frequency table.
///
/// Periods from the Doodson development; the eight constituents here
/// dominate UK coastal records.
pub const CONSTITUENTS: &[Constituent] = &[
    // Semi-diurnal
    Constituent { name: "M2", period_hours: 12.420_601_2 },
    Constituent { name: "S2", period_hours: 12.0 },
    Constituent { name: "N2", period_hours: 12.658_347_51 },
    Constituent { name: "K2", period_hours: 11.967_236_06 },
    // Diurnal
    Constituent { name: "K1", period_hours: 23.934_472_13 },
    Constituent { name: "O1", period_hours: 25.819_338_71 },
    Constituent { name: "P1", period_hours: 24.065_887_66 },
    Constituent { name: "Q1", period_hours: 26.868_350_0 },
];

/// Look up a constituent by name (case-insensitive).
pub fn lookup_constituent(name: &str) -> Result<Constituent> {
    CONSTITUENTS
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(name))
        .copied()
        .ok_or_else(|| Error::unknown_constituent(name))
}

/// Fitted amplitude and phase for one constituent.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstituentFit {
    pub name: String,
    /// Amplitude in metres
    pub amplitude: f64,
    /// Phase lag in radians, [0, 2π), under the `H·cos(ωt − φ)` convention
    pub phase: f64,
}

/// Full result of a harmonic analysis, in caller-supplied constituent order.
#[derive(Debug, Clone, PartialEq)]
pub struct HarmonicResult {
    pub fits: Vec<ConstituentFit>,
}

impl HarmonicResult {
    /// Get a fitted constituent by name.
    pub fn get(&self, name: &str) -> Option<&ConstituentFit> {
        self.fits.iter().find(|f| f.name.eq_ignore_ascii_case(name))
    }
}

/// Fit the requested constituents to a demeaned series.
///
/// Only present readings participate; each reading contributes its own
/// elapsed-seconds value, computed from the same record as the fitted
/// value, so dropping gaps cannot shift times against levels. Elapsed
/// time is measured from `reference`.
pub fn harmonic_analysis<S: AsRef<str>>(
    series: &Series,
    constituents: &[S],
    reference: DateTime<Utc>,
) -> Result<HarmonicResult> {
    let resolved: Vec<Constituent> = constituents
        .iter()
        .map(|name| lookup_constituent(name.as_ref()))
        .collect::<Result<_>>()?;

    // A repeated constituent duplicates its design matrix columns, making
    // the normal equations singular
    for (i, c) in resolved.iter().enumerate() {
        if resolved[..i].iter().any(|prev| prev.name == c.name) {
            return Err(Error::configuration(format!(
                "constituent '{}' requested more than once",
                c.name
            )));
        }
    }

    let valid: Vec<(f64, f64)> = series
        .present()
        .map(|(ts, v)| ((ts - reference).num_seconds() as f64, v))
        .collect();

    let n_data = valid.len();
    let n_unknowns = 2 * resolved.len();
    if n_data < n_unknowns {
        return Err(Error::insufficient_data(
            "harmonic analysis",
            n_unknowns,
            n_data,
        ));
    }

    // Design matrix X = [cos(ω₁t), sin(ω₁t), cos(ω₂t), sin(ω₂t), ...]
    let mut x = Mat::<f64>::zeros(n_data, n_unknowns);
    for (i, &(t, _)) in valid.iter().enumerate() {
        for (j, c) in resolved.iter().enumerate() {
            let omega = c.angular_frequency();
            x[(i, 2 * j)] = (omega * t).cos();
            x[(i, 2 * j + 1)] = (omega * t).sin();
        }
    }

    // Normal equations: (XᵀX) β = Xᵀy
    let mut xtx = Mat::<f64>::zeros(n_unknowns, n_unknowns);
    for i in 0..n_unknowns {
        for j in 0..n_unknowns {
            let mut sum = 0.0;
            for k in 0..n_data {
                sum += x[(k, i)] * x[(k, j)];
            }
            xtx[(i, j)] = sum;
        }
    }

    let mut xty = Mat::<f64>::zeros(n_unknowns, 1);
    for i in 0..n_unknowns {
        let mut sum = 0.0;
        for (k, &(_, y)) in valid.iter().enumerate() {
            sum += x[(k, i)] * y;
        }
        xty[(i, 0)] = sum;
    }

    let lu = xtx.as_ref().full_piv_lu();
    let beta = lu.solve(&xty);

    // A singular system (e.g. too few distinct instants to separate the
    // requested frequencies) solves to non-finite coefficients; surface
    // that as a typed failure rather than NaN amplitudes
    if (0..n_unknowns).any(|j| !beta[(j, 0)].is_finite()) {
        return Err(Error::insufficient_data(
            "harmonic analysis (constituents not separable over this record)",
            n_unknowns,
            n_data,
        ));
    }

    let fits = resolved
        .iter()
        .enumerate()
        .map(|(j, c)| {
            let a = beta[(2 * j, 0)];
            let b = beta[(2 * j + 1, 0)];
            ConstituentFit {
                name: c.name.to_string(),
                amplitude: (a * a + b * b).sqrt(),
                phase: wrap_phase(b.atan2(a)),
            }
        })
        .collect();

    debug!(
        n_data,
        constituents = resolved.len(),
        "fitted tidal constituents"
    );
    Ok(HarmonicResult { fits })
}
