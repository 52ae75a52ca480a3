//! Shared test utilities and fixtures for schema tests

use crate::app::models::{RawBatch, RawRecord, RecordKind};
use chrono::NaiveDate;

pub mod definitions_tests;

/// Capture date used across schema tests
pub fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
}

/// Build a raw record from optional string slices
pub fn record(key: &str, values: &[Option<&str>]) -> RawRecord {
    RawRecord {
        key: key.to_string(),
        values: values.iter().map(|v| v.map(|s| s.to_string())).collect(),
    }
}

/// Build a raw batch for a kind on world "pts1"
pub fn batch_of(kind: RecordKind, records: Vec<RawRecord>) -> RawBatch {
    RawBatch {
        world: "pts1".to_string(),
        kind,
        capture_date: test_date(),
        records,
    }
}
