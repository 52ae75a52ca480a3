//! Positional parser for the game's map exports
//!
//! This module turns the headerless comma-delimited text published by every
//! world into keyed batches of raw records, one batch per world and kind.
//! The design favors row-level tolerance: a payload is never rejected
//! outright, individual rows are skipped or deferred instead.
//!
//! ## Architecture
//!
//! The parser is organized into logical components:
//! - [`layout`] - Fixed wire and output column layouts per record kind
//! - [`parser`] - Line splitting, keying, deduplication and derivation
//! - [`stats`] - Parsing statistics for logging and run reports

pub mod layout;
pub mod parser;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use layout::RecordLayout;
pub use parser::{continent_for, parse_batch};
pub use stats::ParseStats;
