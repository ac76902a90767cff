//! Per-gene adjusted averages against a fixed population fit.
//!
//! The population curve (a previous [`crate::fit::fit_phasing`] result) is
//! passed in explicitly; there is no ambient session state. For each gene we
//! compare its observed mean value with the population curve's value at the
//! gene's mean position, normalizing every gene onto the common baseline:
//!
//! ```text
//! Adj.Average = mean(value) − signal(mean(pos), fixed) + fixed.baseline
//! ```

use std::collections::HashMap;

use crate::data::table::Table;
use crate::domain::{GroupRecord, ParamVector, Sample};
use crate::error::PhasingError;
use crate::models::signal;

struct GroupAcc {
    gene: String,
    count: usize,
    sum_pos: f64,
    sum_value: f64,
}

/// Compute one [`GroupRecord`] per distinct gene key in the range-filtered
/// table, in first-appearance order.
pub fn adjust_groups(
    table: &Table,
    gene_column: &str,
    position_column: &str,
    value_column: &str,
    fixed: &ParamVector,
    x_min: i64,
    x_max: i64,
) -> Result<Vec<GroupRecord>, PhasingError> {
    let genes = table.key_column(gene_column)?;
    let positions = table.float_column(position_column)?;
    let values = table.float_column(value_column)?;

    let mut order: Vec<GroupAcc> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for ((gene, &p), &v) in genes.iter().zip(positions).zip(values) {
        if !p.is_finite() {
            continue;
        }
        let pos = p.trunc() as i64;
        if pos < x_min || pos > x_max {
            continue;
        }

        let slot = *index.entry(gene.clone()).or_insert_with(|| {
            order.push(GroupAcc {
                gene: gene.clone(),
                count: 0,
                sum_pos: 0.0,
                sum_value: 0.0,
            });
            order.len() - 1
        });
        let acc = &mut order[slot];
        acc.count += 1;
        acc.sum_pos += pos as f64;
        acc.sum_value += v;
    }

    Ok(order
        .into_iter()
        .map(|acc| {
            let mean_pos = acc.sum_pos / acc.count as f64;
            let mean_value = acc.sum_value / acc.count as f64;
            GroupRecord {
                gene: acc.gene,
                adj_average: mean_value - signal(mean_pos, fixed) + fixed.baseline,
            }
        })
        .collect())
}

/// Look up one gene's adjustment value.
///
/// An absent key is a [`PhasingError::GroupNotFound`], never a numeric
/// default — a valid adjustment of 0.0 and a missing gene are different
/// answers.
pub fn lookup(records: &[GroupRecord], gene: &str) -> Result<f64, PhasingError> {
    records
        .iter()
        .find(|r| r.gene == gene)
        .map(|r| r.adj_average)
        .ok_or_else(|| PhasingError::GroupNotFound {
            gene: gene.to_string(),
        })
}

/// Extract one gene's prepared series (for plotting next to the shifted
/// population curve).
///
/// Fails with [`PhasingError::GroupNotFound`] if the key never occurs in the
/// gene column; a gene whose rows all fall outside the window yields an
/// empty series.
pub fn gene_samples(
    table: &Table,
    gene_column: &str,
    position_column: &str,
    value_column: &str,
    gene: &str,
    x_min: i64,
    x_max: i64,
) -> Result<Vec<Sample>, PhasingError> {
    let genes = table.key_column(gene_column)?;
    let positions = table.float_column(position_column)?;
    let values = table.float_column(value_column)?;

    if !genes.iter().any(|g| g == gene) {
        return Err(PhasingError::GroupNotFound {
            gene: gene.to_string(),
        });
    }

    let mut samples = Vec::new();
    for ((g, &p), &v) in genes.iter().zip(positions).zip(values) {
        if g != gene || !p.is_finite() {
            continue;
        }
        let pos = p.trunc() as i64;
        if pos < x_min || pos > x_max {
            continue;
        }
        samples.push(Sample { pos, value: v });
    }
    samples.sort_by_key(|s| s.pos);
    Ok(samples)
}
