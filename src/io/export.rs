//! Result exports.
//!
//! The exports are meant to be easy to consume in spreadsheets or downstream
//! scripts: processed samples and gene tables as plain CSV, the full fit
//! result as pretty JSON, and the metric table using the exact labels and
//! precisions of `report::metric_rows`.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::{FitResult, GroupRecord, Sample};
use crate::error::PhasingError;
use crate::report::metric_rows;

/// Write a processed `Pos,Value` series to CSV.
pub fn write_samples_csv(path: &Path, samples: &[Sample]) -> Result<(), PhasingError> {
    let mut file = create(path)?;
    writeln!(file, "Pos,Value").map_err(|e| write_err(path, e))?;
    for s in samples {
        writeln!(file, "{},{}", s.pos, s.value).map_err(|e| write_err(path, e))?;
    }
    Ok(())
}

/// Write the per-gene adjusted averages as a `Gene,Adj.Average` table.
pub fn write_gene_table_csv(path: &Path, records: &[GroupRecord]) -> Result<(), PhasingError> {
    let mut file = create(path)?;
    writeln!(file, "Gene,Adj.Average").map_err(|e| write_err(path, e))?;
    for r in records {
        writeln!(file, "{},{}", r.gene, r.adj_average).map_err(|e| write_err(path, e))?;
    }
    Ok(())
}

/// Write the two-column `Metric,Value` table for a fit result.
pub fn write_metrics_csv(path: &Path, result: &FitResult) -> Result<(), PhasingError> {
    let mut file = create(path)?;
    writeln!(file, "Metric,Value").map_err(|e| write_err(path, e))?;
    for (metric, value) in metric_rows(result) {
        writeln!(file, "{metric},{value}").map_err(|e| write_err(path, e))?;
    }
    Ok(())
}

/// Write the full fit result (parameters, errors, statistics) as pretty JSON.
pub fn write_fit_json(path: &Path, result: &FitResult) -> Result<(), PhasingError> {
    let file = create(path)?;
    serde_json::to_writer_pretty(file, result).map_err(|e| PhasingError::Io {
        message: format!("failed to write fit JSON '{}': {e}", path.display()),
    })
}

fn create(path: &Path) -> Result<File, PhasingError> {
    File::create(path).map_err(|e| PhasingError::Io {
        message: format!("failed to create '{}': {e}", path.display()),
    })
}

fn write_err(path: &Path, e: std::io::Error) -> PhasingError {
    PhasingError::Io {
        message: format!("failed to write '{}': {e}", path.display()),
    }
}
