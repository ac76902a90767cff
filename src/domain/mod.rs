//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - prepared observation points (`Sample`)
//! - the six-parameter model vector (`ParamVector`)
//! - fit outputs (`FitResult`, `FitStats`)
//! - per-gene adjustment records (`GroupRecord`)

pub mod types;

pub use types::*;
