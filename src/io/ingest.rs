//! CSV ingest.
//!
//! Turns a headered CSV stream into a [`Table`] with per-column typing:
//! a column where every non-empty field parses as `f64` becomes `Float`
//! (empty fields become NaN so row counts stay aligned), anything else
//! becomes `Text`. Ragged rows are an error — silently padding them would
//! misalign positions and values.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::data::table::{Column, Table};
use crate::error::PhasingError;

/// Read a headered CSV stream into a [`Table`].
pub fn read_table<R: Read>(reader: R) -> Result<Table, PhasingError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| PhasingError::Csv {
            message: format!("failed to read CSV headers: {e}"),
        })?
        .clone();

    let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for (idx, record) in rdr.records().enumerate() {
        let record = record.map_err(|e| PhasingError::Csv {
            message: format!("failed to read CSV record: {e}"),
        })?;
        if record.len() != headers.len() {
            return Err(PhasingError::Csv {
                message: format!(
                    "row {} has {} fields, expected {}",
                    idx + 2,
                    record.len(),
                    headers.len()
                ),
            });
        }
        for (col, field) in record.iter().enumerate() {
            cells[col].push(field.to_string());
        }
    }

    let columns = headers
        .iter()
        .zip(cells)
        .map(|(name, fields)| (name.to_string(), type_column(fields)))
        .collect();
    Table::from_columns(columns)
}

/// Read a CSV file into a [`Table`].
pub fn read_table_csv(path: &Path) -> Result<Table, PhasingError> {
    let file = File::open(path).map_err(|e| PhasingError::Io {
        message: format!("failed to open CSV '{}': {e}", path.display()),
    })?;
    read_table(file)
}

fn type_column(fields: Vec<String>) -> Column {
    let mut floats = Vec::with_capacity(fields.len());
    for field in &fields {
        if field.is_empty() {
            floats.push(f64::NAN);
        } else if let Ok(v) = field.parse::<f64>() {
            floats.push(v);
        } else {
            return Column::Text(fields);
        }
    }
    Column::Float(floats)
}
