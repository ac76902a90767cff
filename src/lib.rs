//! `phasefit` library crate.
//!
//! Fits a decaying, linearly-drifting sinusoid to positional signal data
//! (e.g., methylation rate vs. position relative to the +1 nucleosome) and
//! derives spacing/decay/amplitude statistics with uncertainty estimates.
//!
//! Layout:
//!
//! - `models`: the signal/envelope functions and their partial derivatives
//! - `math`: the Levenberg–Marquardt solver used by the fit engine
//! - `fit`: parameter initialization, fitting, derived statistics
//! - `data`: tabular input, filtering/sorting, synthetic series
//! - `adjust`: per-gene adjusted averages against a fixed population fit
//! - `io`: CSV ingest and CSV/JSON exports
//! - `report`: formatted result output shared by display and export

pub mod adjust;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod models;
pub mod report;

pub use domain::{FitResult, FitStats, GroupRecord, PARAM_COUNT, ParamVector, Sample};
pub use error::PhasingError;
pub use fit::fit_phasing;
