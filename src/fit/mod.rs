//! Phasing fit orchestration.
//!
//! Responsibilities:
//!
//! - build the biologically-motivated initial guess
//! - run the Levenberg–Marquardt solver against the signal model
//! - compute derived statistics and propagate parameter errors

pub mod fitter;
pub mod stats;

pub use fitter::*;
pub use stats::*;
