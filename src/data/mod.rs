//! Tabular input handling and synthetic series generation.
//!
//! - `table`: a small column-oriented table addressed by header name
//! - `prepare`: range filtering, integer coercion, and sorting into samples
//! - `synthetic`: seeded series generation from known parameters

pub mod prepare;
pub mod synthetic;
pub mod table;

pub use prepare::*;
pub use table::*;
