//! Batch validation and coercion into typed frames
//!
//! Raw batches carry text values only. Validation assembles them into a
//! text frame, coerces every column to its schema type, then drops rows
//! whose required columns did not survive coercion. Row drops are
//! recovered silently; a batch only fails when nothing survives.

use super::definitions::{ColumnType, KindSchema};
use crate::app::models::{RawBatch, ValidatedBatch};
use crate::constants::{SNAPSHOT_DATE_FORMAT, columns};
use crate::{Error, Result};

use polars::prelude::*;
use tracing::warn;

/// Validate one raw batch against its kind's fixed schema
pub fn validate_batch(batch: &RawBatch) -> Result<ValidatedBatch> {
    let schema = KindSchema::for_kind(batch.kind);
    let frame = build_text_frame(batch, schema)?;
    let frame = coerce_and_filter(frame, schema)?;

    let rows_received = batch.len();
    let rows_dropped = rows_received - frame.height();
    if rows_received > 0 && frame.height() == 0 {
        return Err(Error::batch_validation(
            &batch.world,
            batch.kind.to_string(),
            format!("all {} rows failed validation", rows_received),
        ));
    }
    if rows_dropped > 0 {
        warn!(
            "Dropped {} of {} {} rows on '{}' during validation",
            rows_dropped, rows_received, batch.kind, batch.world
        );
    }

    Ok(ValidatedBatch {
        world: batch.world.clone(),
        kind: batch.kind,
        frame,
        rows_received,
        rows_dropped,
    })
}

/// Assemble record values and stamp columns into an all-text frame
fn build_text_frame(batch: &RawBatch, schema: &KindSchema) -> Result<DataFrame> {
    let height = batch.len();
    let mut cols: Vec<Column> = Vec::with_capacity(schema.columns.len());

    for (index, spec) in schema.value_columns().iter().enumerate() {
        let values: Vec<Option<String>> = batch
            .records
            .iter()
            .map(|record| record.values.get(index).cloned().flatten())
            .collect();
        cols.push(Column::new(spec.name.into(), values));
    }

    let stamp = batch.capture_date.format(SNAPSHOT_DATE_FORMAT).to_string();
    cols.push(Column::new(columns::DATETIME.into(), vec![stamp; height]));
    cols.push(Column::new(
        columns::SERVER.into(),
        vec![batch.world.clone(); height],
    ));

    DataFrame::new(cols).map_err(|e| Error::frame("failed to assemble batch columns", e))
}

/// Coerce columns to their schema types and drop rows missing required values
fn coerce_and_filter(frame: DataFrame, schema: &KindSchema) -> Result<DataFrame> {
    let mut casts: Vec<Expr> = Vec::new();
    for spec in schema.columns {
        match spec.dtype {
            ColumnType::Int64 => casts.push(col(spec.name).cast(DataType::Int64)),
            ColumnType::Date => casts.push(col(spec.name).str().to_date(StrptimeOptions {
                format: Some(SNAPSHOT_DATE_FORMAT.into()),
                strict: false,
                ..Default::default()
            })),
            ColumnType::Utf8 => {}
        }
    }

    let keep = schema
        .required_columns()
        .map(|spec| col(spec.name).is_not_null())
        .reduce(|acc, expr| acc.and(expr))
        .unwrap_or_else(|| lit(true));

    let selection: Vec<Expr> = schema.columns.iter().map(|spec| col(spec.name)).collect();

    frame
        .lazy()
        .with_columns(casts)
        .filter(keep)
        .select(selection)
        .collect()
        .map_err(|e| Error::frame("failed to coerce batch to its schema", e))
}
