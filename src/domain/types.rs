//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they
//! can be:
//!
//! - used in-memory during fitting
//! - exported to JSON/CSV
//! - passed back in later as the fixed population fit for gene adjustment

use serde::{Deserialize, Serialize};

/// Number of free parameters in the phasing model.
pub const PARAM_COUNT: usize = 6;

/// A prepared observation: integer position and measured value.
///
/// Positions are integer base-pair offsets after preparation (fractional
/// inputs are truncated toward zero).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub pos: i64,
    pub value: f64,
}

/// The six parameters of the decaying-sinusoid model:
///
/// `y(x) = A·exp(-l·x)·sin(w0·x + theta0) + b + s·x`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParamVector {
    /// Amplitude `A`.
    pub amplitude: f64,
    /// Decay constant `l` (per bp; positive values decay).
    pub decay: f64,
    /// Angular frequency `w0` (rad per bp).
    pub omega: f64,
    /// Phase offset `theta0` (rad).
    pub phase: f64,
    /// Baseline `b`.
    pub baseline: f64,
    /// Linear drift `s` (per bp).
    pub slope: f64,
}

impl ParamVector {
    /// Order: `[A, l, w0, theta0, b, s]`.
    pub fn from_array(p: [f64; PARAM_COUNT]) -> Self {
        Self {
            amplitude: p[0],
            decay: p[1],
            omega: p[2],
            phase: p[3],
            baseline: p[4],
            slope: p[5],
        }
    }

    /// Order: `[A, l, w0, theta0, b, s]`.
    pub fn to_array(self) -> [f64; PARAM_COUNT] {
        [
            self.amplitude,
            self.decay,
            self.omega,
            self.phase,
            self.baseline,
            self.slope,
        ]
    }

    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|v| v.is_finite())
    }
}

/// Derived summary statistics of a phasing fit.
///
/// Unit conventions: spacing in bp, slope rescaled to "per kb" (native
/// slope × 1000) with a matching rescaled error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitStats {
    /// R² penalized for the six-parameter model.
    pub adj_r2: f64,
    /// Peak-to-peak distance `2π / w0` (bp).
    pub spacing: f64,
    /// First-order propagated spacing error (bp).
    pub spacing_err: f64,
    /// Fractional amplitude retained over one spacing: `exp(-l·spacing)`.
    pub decay_per_period: f64,
    /// Slope per kb (`s × 1000`).
    pub slope_per_kb: f64,
    /// Slope error per kb.
    pub slope_per_kb_err: f64,
    pub amplitude: f64,
    pub amplitude_err: f64,
    /// Phase offset `theta0` (rad).
    pub phase: f64,
    /// Baseline `b`.
    pub baseline: f64,
    /// Mean of the fitted curve over the input positions.
    pub adj_mean: f64,
}

impl FitStats {
    /// True when every derived statistic is a usable finite number.
    pub fn is_finite(&self) -> bool {
        [
            self.adj_r2,
            self.spacing,
            self.spacing_err,
            self.decay_per_period,
            self.slope_per_kb,
            self.slope_per_kb_err,
            self.amplitude,
            self.amplitude_err,
            self.phase,
            self.baseline,
            self.adj_mean,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

/// Immutable output of a successful phasing fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    /// Fitted parameters.
    pub params: ParamVector,
    /// Per-parameter standard errors (sqrt of the covariance diagonal).
    pub errors: ParamVector,
    /// Derived summary statistics.
    pub stats: FitStats,
    /// Number of points used in the fit.
    pub n_points: usize,
}

/// A per-gene adjusted average against a fixed population fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupRecord {
    pub gene: String,
    /// Gene-mean value normalized onto the population baseline:
    /// `mean(value) − signal(mean(pos), fixed) + fixed.baseline`.
    pub adj_average: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn param_vector_array_round_trip() {
        let p = ParamVector {
            amplitude: 1.0,
            decay: 0.01,
            omega: 0.04,
            phase: -1.5,
            baseline: 0.5,
            slope: 2e-4,
        };
        assert_eq!(ParamVector::from_array(p.to_array()), p);
    }

    #[test]
    fn param_vector_finite_check() {
        let mut p = ParamVector::from_array([0.0; PARAM_COUNT]);
        assert!(p.is_finite());
        p.omega = f64::NAN;
        assert!(!p.is_finite());
    }

    #[test]
    fn fit_stats_finite_check() {
        let mut s = FitStats {
            adj_r2: 0.9,
            spacing: 150.0,
            spacing_err: 0.5,
            decay_per_period: 0.2,
            slope_per_kb: 0.25,
            slope_per_kb_err: 0.03,
            amplitude: 1.0,
            amplitude_err: 0.01,
            phase: -1.0,
            baseline: 0.5,
            adj_mean: 0.5,
        };
        assert!(s.is_finite());
        s.adj_r2 = f64::NAN;
        assert!(!s.is_finite());
    }
}
