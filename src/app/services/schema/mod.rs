//! Fixed snapshot schemas and batch validation
//!
//! Downstream consumers rely on every snapshot of a kind carrying the same
//! columns in the same order with the same types. This module owns those
//! fixed schemas and the validation pass that enforces them with row-level
//! tolerance.
//!
//! ## Architecture
//!
//! - [`definitions`] - Per-kind column specs: names, types, required flags
//! - [`validator`] - Coercion into typed polars frames and the row-drop policy

pub mod definitions;
pub mod validator;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use definitions::{ColumnSpec, ColumnType, KindSchema};
pub use validator::validate_batch;
