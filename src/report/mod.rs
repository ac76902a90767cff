//! Formatted result output.
//!
//! We keep formatting code in one place so:
//! - the math/fitting code stays clean and testable
//! - the CSV metric export and terminal display cannot drift apart

pub mod format;

pub use format::*;
