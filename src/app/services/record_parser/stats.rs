//! Parsing statistics for map export processing
//!
//! This module provides counters for tracking how much of a payload survived
//! parsing, for logging and run reports.

/// Simple parsing statistics for one world/kind payload
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ParseStats {
    /// Non-blank lines encountered in the payload
    pub rows_seen: usize,

    /// Unique records produced after deduplication
    pub records_parsed: usize,

    /// Rows skipped because no usable key field was present
    pub rows_unkeyed: usize,

    /// Rows replaced by a later row carrying the same key
    pub duplicate_keys: usize,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self {
            rows_seen: 0,
            records_parsed: 0,
            rows_unkeyed: 0,
            duplicate_keys: 0,
        }
    }

    /// Fraction of rows that could be keyed, as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.rows_seen == 0 {
            100.0
        } else {
            ((self.rows_seen - self.rows_unkeyed) as f64 / self.rows_seen as f64) * 100.0
        }
    }

    /// Whether every row was keyed
    pub fn is_clean(&self) -> bool {
        self.rows_unkeyed == 0
    }
}

impl Default for ParseStats {
    fn default() -> Self {
        Self::new()
    }
}
