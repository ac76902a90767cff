//! Model evaluation for the decaying-sinusoid phasing model.
//!
//! The fitter relies on two primitive operations:
//! - predict `y(x)` given the six parameters (for residuals/statistics)
//! - evaluate the partial derivatives of `y(x)` (for the LM Jacobian)
//!
//! The envelope functions and grid sampling exist for plotting consumers.

pub mod model;

pub use model::*;
