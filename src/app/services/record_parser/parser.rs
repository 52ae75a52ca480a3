//! Core parsing of map export payloads into raw record batches
//!
//! Payloads arrive already normalized by the endpoint client. Parsing is
//! purely positional and never fails a whole payload: rows that cannot be
//! keyed are skipped and counted, everything else is deferred to the
//! validator's row-drop policy.

use super::layout::RecordLayout;
use super::stats::ParseStats;
use crate::app::models::{RawBatch, RawRecord, RecordKind};
use crate::constants::{FIELD_DELIMITER, columns};

use chrono::NaiveDate;
use indexmap::IndexMap;
use tracing::debug;

/// Parse one normalized payload into a keyed batch of raw records
///
/// Records carrying the same key collapse to the last one seen while the
/// first encounter position is kept, so re-announced entities do not move
/// within a snapshot.
pub fn parse_batch(
    world: &str,
    kind: RecordKind,
    capture_date: NaiveDate,
    payload: &str,
) -> (RawBatch, ParseStats) {
    let layout = RecordLayout::for_kind(kind);
    let mut stats = ParseStats::new();
    let mut by_key: IndexMap<String, Vec<Option<String>>> = IndexMap::new();

    for line in payload.lines() {
        if line.is_empty() {
            continue;
        }
        stats.rows_seen += 1;

        let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
        let key = match fields.get(kind.key_index()) {
            Some(raw) if !raw.is_empty() => (*raw).to_string(),
            _ => {
                debug!("Skipping unkeyable {} row on '{}': {:?}", kind, world, line);
                stats.rows_unkeyed += 1;
                continue;
            }
        };

        let values = align_fields(layout, &fields);
        if by_key.insert(key, values).is_some() {
            stats.duplicate_keys += 1;
        }
    }

    stats.records_parsed = by_key.len();
    debug!(
        "Parsed {} {} records from {} rows on '{}'",
        stats.records_parsed, kind, stats.rows_seen, world
    );

    let records = by_key
        .into_iter()
        .map(|(key, values)| RawRecord { key, values })
        .collect();

    let batch = RawBatch {
        world: world.to_string(),
        kind,
        capture_date,
        records,
    };
    (batch, stats)
}

/// Derive the continent of a village from its coordinates
///
/// The continent is the leading digit of `y` followed by the leading digit
/// of `x`; coordinates 469/696 sit on continent 64.
pub fn continent_for(x: &str, y: &str) -> Option<String> {
    let first_y = y.chars().next()?;
    let first_x = x.chars().next()?;
    Some(format!("{}{}", first_y, first_x))
}

/// Align wire fields to the output column order of a layout
///
/// Short rows yield absent trailing values, extra fields are ignored, and
/// the continent column is derived rather than copied.
fn align_fields(layout: &RecordLayout, fields: &[&str]) -> Vec<Option<String>> {
    layout
        .output_columns
        .iter()
        .map(|name| match layout.wire_position(name) {
            Some(position) => wire_value(fields, position),
            None if *name == columns::CONTINENT => derive_continent(layout, fields),
            None => None,
        })
        .collect()
}

/// Value of one wire field, with empty fields treated as absent
fn wire_value(fields: &[&str], position: usize) -> Option<String> {
    match fields.get(position) {
        Some(raw) if !raw.is_empty() => Some((*raw).to_string()),
        _ => None,
    }
}

/// Continent value for a row, when both coordinates are present
fn derive_continent(layout: &RecordLayout, fields: &[&str]) -> Option<String> {
    let x = layout
        .wire_position(columns::X)
        .and_then(|p| wire_value(fields, p))?;
    let y = layout
        .wire_position(columns::Y)
        .and_then(|p| wire_value(fields, p))?;
    continent_for(&x, &y)
}
