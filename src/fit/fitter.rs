//! The phasing fit engine.
//!
//! Given equal-length position/value arrays:
//!
//! - build the initial guess around the ~160 bp default nucleosome repeat
//! - minimize the signal residuals with Levenberg–Marquardt
//! - reject degenerate solutions instead of emitting undefined statistics
//! - derive spacing/decay/amplitude/slope summaries with propagated errors

use std::f64::consts::PI;

use nalgebra::{DMatrix, DVector};

use crate::domain::{FitResult, FitStats, PARAM_COUNT, ParamVector};
use crate::error::PhasingError;
use crate::fit::stats;
use crate::math::{LmOptions, lm_fit};
use crate::models::{signal, signal_partials, signal_series};

/// Default nucleosome repeat length (bp) used to seed the optimizer.
const DEFAULT_PERIOD_BP: f64 = 160.0;

/// Minimum usable points: six parameters plus enough residual degrees of
/// freedom for the error scale `SSR/(n−p)` and adjusted R² to be defined.
pub const MIN_POINTS: usize = PARAM_COUNT + 2;

/// Fit the decaying-sinusoid phasing model to `(positions, values)`.
///
/// Returns an immutable [`FitResult`] or an explicit failure; a failed or
/// degenerate minimization never produces a partially-populated result.
pub fn fit_phasing(positions: &[f64], values: &[f64]) -> Result<FitResult, PhasingError> {
    if positions.len() != values.len() {
        return Err(PhasingError::LengthMismatch {
            positions: positions.len(),
            values: values.len(),
        });
    }
    let n = values.len();
    if n < MIN_POINTS {
        return Err(PhasingError::InsufficientData {
            needed: MIN_POINTS,
            got: n,
        });
    }

    let guess = initial_guess(values);

    let residuals = |p: &DVector<f64>| {
        let pv = param_vector(p);
        DVector::from_iterator(
            n,
            positions
                .iter()
                .zip(values)
                .map(|(&x, &y)| y - signal(x, &pv)),
        )
    };
    let jacobian = |p: &DVector<f64>| {
        let pv = param_vector(p);
        let mut jac = DMatrix::zeros(n, PARAM_COUNT);
        for (i, &x) in positions.iter().enumerate() {
            let row = signal_partials(x, &pv);
            for (j, &d) in row.iter().enumerate() {
                jac[(i, j)] = d;
            }
        }
        jac
    };

    let out = lm_fit(residuals, jacobian, &guess, &LmOptions::default())?;

    let params = param_vector(&out.params);
    if !params.is_finite() {
        return Err(PhasingError::DegenerateFit {
            reason: "non-finite fitted parameters".to_string(),
        });
    }
    // spacing = 2π/w0 must be positive; a non-positive frequency means the
    // optimizer collapsed the oscillation and the derived statistics are
    // meaningless.
    if params.omega <= 0.0 {
        return Err(PhasingError::DegenerateFit {
            reason: format!(
                "fitted angular frequency {:.6} leaves the spacing undefined",
                params.omega
            ),
        });
    }

    let errors = standard_errors(&out.covariance)?;

    let fitted = signal_series(positions, &params);
    let r2 = stats::r_squared(values, &fitted);
    let spacing = stats::spacing(params.omega);

    let fit_stats = FitStats {
        adj_r2: stats::adjusted_r_squared(r2, n, PARAM_COUNT),
        spacing,
        spacing_err: stats::spacing_error(params.omega, errors.omega),
        decay_per_period: stats::decay_per_period(params.decay, spacing),
        slope_per_kb: params.slope * 1000.0,
        slope_per_kb_err: errors.slope * 1000.0,
        amplitude: params.amplitude,
        amplitude_err: errors.amplitude,
        phase: params.phase,
        baseline: params.baseline,
        adj_mean: stats::mean(&fitted),
    };
    // Constant values leave R² as 0/0; a non-finite statistic is an explicit
    // failure, never a NaN in the result.
    if !fit_stats.is_finite() {
        return Err(PhasingError::DegenerateFit {
            reason: "non-finite derived statistics (zero-variance input)".to_string(),
        });
    }

    Ok(FitResult {
        params,
        errors,
        stats: fit_stats,
        n_points: n,
    })
}

/// Initial guess: amplitude just above the observed maximum, the default
/// ~160 bp repeat, a trough phase, the sample mean as baseline, zero drift.
fn initial_guess(values: &[f64]) -> [f64; PARAM_COUNT] {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    [
        1.1 * max,
        1.0 / DEFAULT_PERIOD_BP,
        2.0 * PI / DEFAULT_PERIOD_BP,
        -PI / 2.0,
        stats::mean(values),
        0.0,
    ]
}

fn param_vector(p: &DVector<f64>) -> ParamVector {
    ParamVector::from_array(std::array::from_fn(|i| p[i]))
}

/// Per-parameter standard errors, the square roots of the covariance
/// diagonal. A negative diagonal entry is not a variance, so the fit is
/// rejected instead of reported with a zero error bar.
fn standard_errors(covariance: &DMatrix<f64>) -> Result<ParamVector, PhasingError> {
    let mut errs = [0.0; PARAM_COUNT];
    for (i, err) in errs.iter_mut().enumerate() {
        let var = covariance[(i, i)];
        if var < 0.0 {
            return Err(PhasingError::DegenerateFit {
                reason: format!("negative variance {var:e} for parameter {i}"),
            });
        }
        *err = var.sqrt();
    }
    Ok(ParamVector::from_array(errs))
}
