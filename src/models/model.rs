//! The phasing model and its derivatives.
//!
//! All functions here are pure and stateless. The decay sign convention is
//! `l ≥ 0` for a decaying oscillation; this is not enforced — the fitter and
//! its callers own that convention.

use crate::domain::{PARAM_COUNT, ParamVector};

/// Combined signal: `A·exp(-l·x)·sin(w0·x + theta0) + b + s·x`.
pub fn signal(x: f64, p: &ParamVector) -> f64 {
    p.amplitude * (-p.decay * x).exp() * (p.omega * x + p.phase).sin()
        + p.baseline
        + p.slope * x
}

/// Upper envelope: `A·exp(-l·x) + b + s·x`.
pub fn upper_envelope(x: f64, p: &ParamVector) -> f64 {
    p.amplitude * (-p.decay * x).exp() + p.baseline + p.slope * x
}

/// Lower envelope: `-A·exp(-l·x) + b + s·x`.
pub fn lower_envelope(x: f64, p: &ParamVector) -> f64 {
    -p.amplitude * (-p.decay * x).exp() + p.baseline + p.slope * x
}

/// Partial derivatives of `signal` with respect to `[A, l, w0, theta0, b, s]`.
pub fn signal_partials(x: f64, p: &ParamVector) -> [f64; PARAM_COUNT] {
    let damp = (-p.decay * x).exp();
    let angle = p.omega * x + p.phase;
    let sin = angle.sin();
    let cos = angle.cos();
    [
        damp * sin,
        -x * p.amplitude * damp * sin,
        x * p.amplitude * damp * cos,
        p.amplitude * damp * cos,
        1.0,
        x,
    ]
}

/// Evaluate `signal` elementwise over a slice of positions.
pub fn signal_series(xs: &[f64], p: &ParamVector) -> Vec<f64> {
    xs.iter().map(|&x| signal(x, p)).collect()
}

/// Sample the fitted curve on an evenly spaced grid (for plotting).
///
/// Returns `(xs, ys)` with `n` points spanning `[x_min, x_max]` inclusive;
/// `n` is clamped to at least 2.
pub fn sample_curve(p: &ParamVector, x_min: f64, x_max: f64, n: usize) -> (Vec<f64>, Vec<f64>) {
    let n = n.max(2);
    let step = (x_max - x_min) / (n as f64 - 1.0);
    let xs: Vec<f64> = (0..n).map(|i| x_min + step * i as f64).collect();
    let ys = signal_series(&xs, p);
    (xs, ys)
}
