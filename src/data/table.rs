//! A minimal column-oriented table.
//!
//! This is the inbound boundary of the crate: presentation layers hand the
//! core a `Table` (usually built by `io::read_table`) plus column names, and
//! the core never touches files or widgets itself.

use crate::error::PhasingError;

/// A single named column.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Float(Vec<f64>),
    Text(Vec<String>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Float(v) => v.len(),
            Column::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A rectangular table with named columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    names: Vec<String>,
    columns: Vec<Column>,
}

impl Table {
    /// Build a table from `(name, column)` pairs.
    ///
    /// Columns of unequal length cannot form a rectangular table; the
    /// mismatch is rejected here so positions and values can never misalign
    /// downstream.
    pub fn from_columns(columns: Vec<(String, Column)>) -> Result<Self, PhasingError> {
        if let Some((_, first)) = columns.first() {
            let len = first.len();
            for (_, col) in &columns {
                if col.len() != len {
                    return Err(PhasingError::LengthMismatch {
                        positions: len,
                        values: col.len(),
                    });
                }
            }
        }
        let (names, columns) = columns.into_iter().unzip();
        Ok(Self { names, columns })
    }

    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| &self.columns[i])
    }

    /// A required numeric column.
    pub fn float_column(&self, name: &str) -> Result<&[f64], PhasingError> {
        match self.column(name) {
            None => Err(PhasingError::MissingColumn {
                column: name.to_string(),
            }),
            Some(Column::Text(_)) => Err(PhasingError::NonNumericColumn {
                column: name.to_string(),
            }),
            Some(Column::Float(v)) => Ok(v),
        }
    }

    /// A required key column, stringified if it was ingested as numeric
    /// (gene identifiers are occasionally purely numeric).
    pub fn key_column(&self, name: &str) -> Result<Vec<String>, PhasingError> {
        match self.column(name) {
            None => Err(PhasingError::MissingColumn {
                column: name.to_string(),
            }),
            Some(Column::Text(v)) => Ok(v.clone()),
            Some(Column::Float(v)) => Ok(v.iter().map(|x| x.to_string()).collect()),
        }
    }
}
