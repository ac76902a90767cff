//! Derived-statistic formulas.
//!
//! Kept separate from the fitter so each formula is unit-testable against
//! hand-computed values. Unit conventions (spacing in bp, slope per kb) are
//! load-bearing: downstream tables and thresholds assume them.

use std::f64::consts::PI;

/// Unadjusted coefficient of determination, `1 − SSR/SST`.
///
/// NaN when the values have zero variance (SST = 0); the fitter turns any
/// non-finite statistic into an explicit failure.
pub fn r_squared(values: &[f64], fitted: &[f64]) -> f64 {
    let mean = mean(values);
    let sst: f64 = values.iter().map(|y| (y - mean).powi(2)).sum();
    let ssr: f64 = values
        .iter()
        .zip(fitted)
        .map(|(y, f)| (y - f).powi(2))
        .sum();
    1.0 - ssr / sst
}

/// R² penalized for parameter count: `1 − (1−R²)(n−1)/(n−p−1)`.
///
/// Undefined for `n − p − 1 ≤ 0`; the fitter enforces a minimum point count
/// so this is never evaluated there.
pub fn adjusted_r_squared(r2: f64, n: usize, p: usize) -> f64 {
    1.0 - (1.0 - r2) * (n as f64 - 1.0) / (n as f64 - p as f64 - 1.0)
}

/// Peak spacing `2π / w0` (bp).
pub fn spacing(omega: f64) -> f64 {
    2.0 * PI / omega
}

/// First-order propagated spacing error: `(2π / w0²)·σ(w0)`.
pub fn spacing_error(omega: f64, omega_err: f64) -> f64 {
    2.0 * PI / (omega * omega) * omega_err
}

/// Fractional amplitude retained over one spacing: `exp(-l·spacing)`.
///
/// Underflows toward 0 for large `l·spacing`; that is the intended
/// behavior, not a condition to clamp.
pub fn decay_per_period(decay: f64, spacing: f64) -> f64 {
    (-decay * spacing).exp()
}

pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
