//! Snapshot store for persisting validated batches as dated NDJSON files
//!
//! Snapshots live at `<data>/<kind-dir>/<YYYY-MM-DD>/<world>.json` with one
//! JSON object per line. Writing is idempotent per world, kind and date: an
//! existing snapshot is never rewritten. Writes land in a temporary file next
//! to the destination and are renamed into place, so an interrupted run can
//! never leave a half-written snapshot behind. The cross-region server table
//! is the one exception and is overwritten on every run.

use crate::app::models::{RecordKind, ServerRow, ValidatedBatch, WriteOutcome};
use crate::constants::{
    SERVER_DATA_DIR, SERVER_DATA_FILENAME, SNAPSHOT_DATE_FORMAT, columns, snapshot_filename,
};
use crate::{Error, Result};

use chrono::NaiveDate;
use polars::prelude::{Column, DataFrame, JsonFormat, JsonWriter, SerWriter};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Filesystem layout and write policy for harvested snapshots
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    /// Directory all snapshot kinds live under
    data_dir: PathBuf,
}

impl SnapshotStore {
    /// Create a store rooted at the given data directory
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Root directory of the store
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of one world snapshot
    pub fn snapshot_path(&self, kind: RecordKind, date: NaiveDate, world: &str) -> PathBuf {
        self.data_dir
            .join(kind.data_dir())
            .join(date.format(SNAPSHOT_DATE_FORMAT).to_string())
            .join(snapshot_filename(world))
    }

    /// Whether a snapshot already exists for this world, kind and date
    ///
    /// The orchestrator checks this before fetching so existing snapshots
    /// skip the whole fetch-parse-validate chain.
    pub fn snapshot_exists(&self, kind: RecordKind, date: NaiveDate, world: &str) -> bool {
        self.snapshot_path(kind, date, world).exists()
    }

    /// Persist a validated batch as a dated NDJSON snapshot
    ///
    /// Returns a skipped outcome when the snapshot appeared since the
    /// orchestrator's existence check rather than rewriting it.
    pub fn write_batch(&self, batch: &ValidatedBatch, date: NaiveDate) -> Result<WriteOutcome> {
        let path = self.snapshot_path(batch.kind, date, &batch.world);
        if path.exists() {
            debug!("Snapshot {} already exists, skipping write", path.display());
            return Ok(WriteOutcome::SkippedExisting);
        }

        let rows = batch.rows();
        let mut frame = batch.frame.clone();
        self.persist_frame(&path, &mut frame)?;

        debug!("Wrote {} rows to {}", rows, path.display());
        Ok(WriteOutcome::Written { rows })
    }

    /// Path of the cross-region server table
    pub fn server_table_path(&self) -> PathBuf {
        self.data_dir.join(SERVER_DATA_DIR).join(SERVER_DATA_FILENAME)
    }

    /// Write the cross-region server table, replacing any previous run's
    pub fn write_server_table(&self, rows: &[ServerRow]) -> Result<usize> {
        let path = self.server_table_path();
        let mut frame = server_table_frame(rows)?;
        self.persist_frame(&path, &mut frame)?;

        debug!("Wrote {} server rows to {}", rows.len(), path.display());
        Ok(rows.len())
    }

    /// Serialize a frame to NDJSON through a sibling temp file and rename it
    /// into place
    fn persist_frame(&self, path: &Path, frame: &mut DataFrame) -> Result<()> {
        let parent = path.parent().unwrap_or(&self.data_dir);
        fs::create_dir_all(parent).map_err(|e| {
            Error::snapshot_write(
                path.display().to_string(),
                "failed to create snapshot directory",
                Box::new(e),
            )
        })?;

        let mut tmp = NamedTempFile::new_in(parent).map_err(|e| {
            Error::snapshot_write(
                path.display().to_string(),
                "failed to create temporary file",
                Box::new(e),
            )
        })?;

        JsonWriter::new(tmp.as_file_mut())
            .with_json_format(JsonFormat::JsonLines)
            .finish(frame)
            .map_err(|e| {
                Error::snapshot_write(
                    path.display().to_string(),
                    "failed to serialize batch",
                    Box::new(e),
                )
            })?;

        tmp.persist(path).map_err(|e| {
            Error::snapshot_write(
                path.display().to_string(),
                "failed to move snapshot into place",
                Box::new(e),
            )
        })?;
        Ok(())
    }
}

/// Build the server table frame in its fixed column order
fn server_table_frame(rows: &[ServerRow]) -> Result<DataFrame> {
    let servers: Vec<String> = rows.iter().map(|r| r.server.clone()).collect();
    let urls: Vec<Option<String>> = rows.iter().map(|r| r.url.clone()).collect();
    let regions: Vec<Option<String>> = rows.iter().map(|r| r.region.clone()).collect();
    let names: Vec<Option<String>> = rows.iter().map(|r| r.region_name.clone()).collect();

    DataFrame::new(vec![
        Column::new(columns::SERVER.into(), servers),
        Column::new(columns::URL.into(), urls),
        Column::new(columns::REGION.into(), regions),
        Column::new(columns::REGION_NAME.into(), names),
    ])
    .map_err(|e| Error::frame("failed to build server table frame", e))
}
