//! Input/output helpers.
//!
//! - CSV ingest + column typing (`ingest`)
//! - sample/gene-table/result exports (CSV/JSON) (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
