//! Crate-wide error type.
//!
//! Every fallible core operation returns `Result<_, PhasingError>`; callers
//! must branch explicitly. In particular, a failed fit never surfaces as a
//! partially-populated result, and an absent gene key is distinct from a
//! zero adjustment.

/// Errors produced by data preparation, fitting, and group adjustment.
#[derive(Debug, Clone, PartialEq)]
pub enum PhasingError {
    /// A required column is absent from the input table.
    MissingColumn { column: String },
    /// A required column exists but is not numeric.
    NonNumericColumn { column: String },
    /// Position and value sequences have different lengths.
    LengthMismatch { positions: usize, values: usize },
    /// Too few usable points to fit the six-parameter model.
    InsufficientData { needed: usize, got: usize },
    /// The minimizer failed to converge or hit a numerical error.
    FitDidNotConverge { reason: String },
    /// The fit converged onto parameters with undefined derived statistics
    /// (e.g., non-positive angular frequency).
    DegenerateFit { reason: String },
    /// A requested gene key is absent from the group table.
    GroupNotFound { gene: String },
    /// Filesystem error during ingest or export.
    Io { message: String },
    /// Malformed CSV input.
    Csv { message: String },
}

impl std::fmt::Display for PhasingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PhasingError::MissingColumn { column } => {
                write!(f, "input table must contain column '{column}'")
            }
            PhasingError::NonNumericColumn { column } => {
                write!(f, "column '{column}' is not numeric")
            }
            PhasingError::LengthMismatch { positions, values } => {
                write!(
                    f,
                    "length mismatch: {positions} positions vs {values} values"
                )
            }
            PhasingError::InsufficientData { needed, got } => {
                write!(f, "insufficient data: need at least {needed} points, got {got}")
            }
            PhasingError::FitDidNotConverge { reason } => {
                write!(f, "fit did not converge: {reason}")
            }
            PhasingError::DegenerateFit { reason } => {
                write!(f, "degenerate fit: {reason}")
            }
            PhasingError::GroupNotFound { gene } => {
                write!(f, "gene '{gene}' is not found in the provided table")
            }
            PhasingError::Io { message } => write!(f, "{message}"),
            PhasingError::Csv { message } => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for PhasingError {}
