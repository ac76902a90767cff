//! Metric rows and the plain-text fit summary.
//!
//! The labels and precisions below are an output contract (spacing to
//! 0.1 bp, amplitudes to 3 decimals, slopes per kb to 2): downstream
//! spreadsheets key on them, so they are fixed here rather than left to
//! callers.

use crate::domain::FitResult;

/// The two-column `(metric, value)` rows shared by display and CSV export.
pub fn metric_rows(result: &FitResult) -> Vec<(String, String)> {
    let s = &result.stats;
    vec![
        ("Spacing (bp)".to_string(), format!("{:.1}", s.spacing)),
        (
            "Spacing Error (bp)".to_string(),
            format!("{:.1}", s.spacing_err),
        ),
        ("Amplitude".to_string(), format!("{:.3}", s.amplitude)),
        (
            "Amplitude Error".to_string(),
            format!("{:.3}", s.amplitude_err),
        ),
        (
            "Slope (per kb)".to_string(),
            format!("{:.2}", s.slope_per_kb),
        ),
        (
            "Slope Error (per kb)".to_string(),
            format!("{:.2}", s.slope_per_kb_err),
        ),
        ("Adjusted R²".to_string(), format!("{:.3}", s.adj_r2)),
        (
            "Decay per Period".to_string(),
            format!("{:.3}", s.decay_per_period),
        ),
        ("Phase (rad)".to_string(), format!("{:.2}", s.phase)),
        ("Baseline (b0)".to_string(), format!("{:.3}", s.baseline)),
    ]
}

/// Format the full fit summary for terminal display.
pub fn format_fit_summary(result: &FitResult) -> String {
    let s = &result.stats;
    let mut out = String::new();

    out.push_str("=== phasefit - Phasing Analysis ===\n");
    out.push_str(&format!("Points: n={}\n", result.n_points));
    out.push_str(&format!("Adjusted R²: {:.3}\n", s.adj_r2));
    out.push_str(&format!(
        "Nucleosome Spacing (bp): {:.1} ± {:.1}\n",
        s.spacing, s.spacing_err
    ));
    out.push_str(&format!(
        "Amplitude: {:.3} ± {:.3}\n",
        s.amplitude, s.amplitude_err
    ));
    out.push_str(&format!("Decay per Period: {:.3}\n", s.decay_per_period));
    out.push_str(&format!(
        "Slope (per kb): {:.2} ± {:.2}\n",
        s.slope_per_kb, s.slope_per_kb_err
    ));
    out.push_str(&format!("Phase (rad): {:.2}\n", s.phase));
    out.push_str(&format!("Baseline (b0): {:.3}\n", s.baseline));
    out.push_str(&format!("Adj. Mean: {:.3}\n", s.adj_mean));

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FitStats, ParamVector};

    fn result() -> FitResult {
        let params = ParamVector {
            amplitude: 0.987,
            decay: 0.01,
            omega: 0.0419,
            phase: -1.23,
            baseline: 0.456,
            slope: 2.5e-4,
        };
        let errors = ParamVector {
            amplitude: 0.012,
            decay: 1e-3,
            omega: 2e-4,
            phase: 0.05,
            baseline: 0.01,
            slope: 3e-5,
        };
        FitResult {
            params,
            errors,
            stats: FitStats {
                adj_r2: 0.912,
                spacing: 149.96,
                spacing_err: 0.72,
                decay_per_period: 0.223,
                slope_per_kb: 0.25,
                slope_per_kb_err: 0.03,
                amplitude: 0.987,
                amplitude_err: 0.012,
                phase: -1.23,
                baseline: 0.456,
                adj_mean: 0.501,
            },
            n_points: 1051,
        }
    }

    #[test]
    fn metric_rows_use_reference_labels_and_precision() {
        let rows = metric_rows(&result());
        assert_eq!(rows[0], ("Spacing (bp)".to_string(), "150.0".to_string()));
        assert_eq!(rows[1], ("Spacing Error (bp)".to_string(), "0.7".to_string()));
        assert_eq!(rows[2], ("Amplitude".to_string(), "0.987".to_string()));
        assert_eq!(rows[4], ("Slope (per kb)".to_string(), "0.25".to_string()));
        assert_eq!(rows[6], ("Adjusted R²".to_string(), "0.912".to_string()));
        assert_eq!(rows[9], ("Baseline (b0)".to_string(), "0.456".to_string()));
        assert_eq!(rows.len(), 10);
    }

    #[test]
    fn summary_contains_value_and_error_pairs() {
        let text = format_fit_summary(&result());
        assert!(text.contains("Nucleosome Spacing (bp): 150.0 ± 0.7"));
        assert!(text.contains("Amplitude: 0.987 ± 0.012"));
        assert!(text.contains("n=1051"));
    }
}
