//! Data preparation for the fit engine.
//!
//! Preparation applies, in order:
//!
//! - positions are coerced to integers by truncation toward zero (not
//!   rounding — truncation is the load-bearing coercion downstream
//!   position tables assume)
//! - rows outside the inclusive `[x_min, x_max]` window are dropped
//! - the survivors are sorted ascending by position, stable on ties

use crate::data::table::Table;
use crate::domain::Sample;
use crate::error::PhasingError;

/// Turn a raw table into a clean, sorted sample series.
///
/// Rows whose position is non-finite cannot be coerced and are dropped with
/// the out-of-range rows; values pass through untouched, so a non-finite
/// value still surfaces downstream as an explicit fit failure rather than
/// being silently repaired here.
pub fn prepare(
    table: &Table,
    position_column: &str,
    value_column: &str,
    x_min: i64,
    x_max: i64,
) -> Result<Vec<Sample>, PhasingError> {
    let positions = table.float_column(position_column)?;
    let values = table.float_column(value_column)?;

    let mut samples = Vec::with_capacity(positions.len());
    for (&p, &v) in positions.iter().zip(values) {
        if !p.is_finite() {
            continue;
        }
        let pos = p.trunc() as i64;
        if pos < x_min || pos > x_max {
            continue;
        }
        samples.push(Sample { pos, value: v });
    }

    // Stable: ties keep their original input order.
    samples.sort_by_key(|s| s.pos);
    Ok(samples)
}

/// Split a prepared series into the `(positions, values)` arrays the fit
/// engine consumes.
pub fn split_samples(samples: &[Sample]) -> (Vec<f64>, Vec<f64>) {
    let positions = samples.iter().map(|s| s.pos as f64).collect();
    let values = samples.iter().map(|s| s.value).collect();
    (positions, values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::table::Column;

    fn table(pos: Vec<f64>, value: Vec<f64>) -> Table {
        Table::from_columns(vec![
            ("Pos".to_string(), Column::Float(pos)),
            ("Value".to_string(), Column::Float(value)),
        ])
        .unwrap()
    }

    #[test]
    fn bounds_are_inclusive() {
        let t = table(vec![-51.0, -50.0, 0.0, 1000.0, 1001.0], vec![1.0; 5]);
        let samples = prepare(&t, "Pos", "Value", -50, 1000).unwrap();
        let kept: Vec<i64> = samples.iter().map(|s| s.pos).collect();
        assert_eq!(kept, vec![-50, 0, 1000]);
    }

    #[test]
    fn positions_truncate_toward_zero() {
        let t = table(vec![2.9, -2.9, 0.7], vec![1.0, 2.0, 3.0]);
        let samples = prepare(&t, "Pos", "Value", -10, 10).unwrap();
        let kept: Vec<i64> = samples.iter().map(|s| s.pos).collect();
        // Sorted: -2 (from -2.9), 0 (from 0.7), 2 (from 2.9).
        assert_eq!(kept, vec![-2, 0, 2]);
    }

    #[test]
    fn unsorted_input_comes_out_non_decreasing_and_stable() {
        let t = table(vec![30.0, 10.0, 20.0, 10.0], vec![1.0, 2.0, 3.0, 4.0]);
        let samples = prepare(&t, "Pos", "Value", 0, 100).unwrap();
        let pos: Vec<i64> = samples.iter().map(|s| s.pos).collect();
        assert_eq!(pos, vec![10, 10, 20, 30]);
        // The two pos=10 rows keep their input order.
        assert_eq!(samples[0].value, 2.0);
        assert_eq!(samples[1].value, 4.0);
    }

    #[test]
    fn missing_column_fails_before_any_computation() {
        let t = table(vec![1.0], vec![1.0]);
        assert_eq!(
            prepare(&t, "Position", "Value", 0, 10).unwrap_err(),
            PhasingError::MissingColumn {
                column: "Position".to_string()
            }
        );
    }

    #[test]
    fn non_finite_positions_are_dropped() {
        let t = table(vec![f64::NAN, 5.0], vec![1.0, 2.0]);
        let samples = prepare(&t, "Pos", "Value", 0, 10).unwrap();
        assert_eq!(samples, vec![Sample { pos: 5, value: 2.0 }]);
    }

    #[test]
    fn split_matches_sample_order() {
        let samples = vec![
            Sample { pos: 1, value: 0.5 },
            Sample { pos: 2, value: 0.7 },
        ];
        let (pos, val) = split_samples(&samples);
        assert_eq!(pos, vec![1.0, 2.0]);
        assert_eq!(val, vec![0.5, 0.7]);
    }
}
