//! Data models for Tribal Wars harvesting
//!
//! This module contains the core data structures for representing game worlds,
//! the record kinds exported by each world, and the batches that flow through
//! the fetch, parse, validate and write stages.

use crate::{Error, Result};
use chrono::NaiveDate;
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

// =============================================================================
// Game World Structure
// =============================================================================

/// A single playable world on a regional portal
///
/// Worlds are announced by the portal's server directory endpoint as pairs of
/// world code and base URL. Every map export endpoint of a world hangs off the
/// base URL.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GameWorld {
    /// Short world code, e.g. "pts1" or "de99"
    pub code: String,

    /// Base URL of the world, e.g. "https://pts1.tribalwars.com.pt"
    pub url: String,
}

impl GameWorld {
    /// Create a new world with validation
    pub fn new(code: impl Into<String>, url: impl Into<String>) -> Result<Self> {
        let world = Self {
            code: code.into(),
            url: url.into(),
        };
        world.validate()?;
        Ok(world)
    }

    /// Validate world data for consistency
    pub fn validate(&self) -> Result<()> {
        if self.code.trim().is_empty() {
            return Err(Error::configuration("world code cannot be empty"));
        }
        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(Error::configuration(format!(
                "world '{}' has a non-http url '{}'",
                self.code, self.url
            )));
        }
        Ok(())
    }

    /// Full endpoint URL for one record kind on this world
    pub fn endpoint_url(&self, kind: RecordKind) -> String {
        format!("{}{}", self.url.trim_end_matches('/'), kind.endpoint_path())
    }
}

impl std::fmt::Display for GameWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code)
    }
}

// =============================================================================
// Record Kind Enumeration
// =============================================================================

/// The five map exports published by every world
///
/// Each kind maps to one text endpoint, one snapshot directory and one output
/// schema. Offense and defense are the opponents-defeated rankings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Village,
    Player,
    Ally,
    Offense,
    Defense,
}

impl RecordKind {
    /// All kinds harvested for every world
    pub fn all() -> [RecordKind; 5] {
        [
            RecordKind::Village,
            RecordKind::Player,
            RecordKind::Ally,
            RecordKind::Offense,
            RecordKind::Defense,
        ]
    }

    /// Endpoint path of this kind's map export
    pub fn endpoint_path(self) -> &'static str {
        match self {
            RecordKind::Village => "/map/village.txt",
            RecordKind::Player => "/map/player.txt",
            RecordKind::Ally => "/map/ally.txt",
            RecordKind::Offense => "/map/kill_att.txt",
            RecordKind::Defense => "/map/kill_def.txt",
        }
    }

    /// Snapshot directory name under the data root
    pub fn data_dir(self) -> &'static str {
        match self {
            RecordKind::Village => "village-data",
            RecordKind::Player => "player-data",
            RecordKind::Ally => "ally-data",
            RecordKind::Offense => "attack-data",
            RecordKind::Defense => "defense-data",
        }
    }

    /// Name of the identifier column records of this kind are keyed by
    pub fn id_column(self) -> &'static str {
        match self {
            RecordKind::Village => crate::constants::columns::VILLAGE_ID,
            RecordKind::Player => crate::constants::columns::PLAYER_ID,
            RecordKind::Ally => crate::constants::columns::ALLY_ID,
            // Ranking rows are keyed by the player they rank, not by rank
            RecordKind::Offense => crate::constants::columns::PLAYER_ID,
            RecordKind::Defense => crate::constants::columns::PLAYER_ID,
        }
    }

    /// Position of the key field within a wire row
    pub fn key_index(self) -> usize {
        match self {
            RecordKind::Village | RecordKind::Player | RecordKind::Ally => 0,
            RecordKind::Offense | RecordKind::Defense => 1,
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RecordKind::Village => "village",
            RecordKind::Player => "player",
            RecordKind::Ally => "ally",
            RecordKind::Offense => "offense",
            RecordKind::Defense => "defense",
        };
        write!(f, "{}", name)
    }
}

// =============================================================================
// Raw Record Structures
// =============================================================================

/// One parsed wire row, keyed and aligned to its kind's output columns
///
/// Values hold decoded text only; type coercion happens during validation.
/// A `None` value marks a field that was absent or empty on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// Identifier the record is keyed by (string form of the id column)
    pub key: String,

    /// Values aligned with the kind's output columns, stamp columns excluded
    pub values: Vec<Option<String>>,
}

/// All raw records parsed from one world/kind fetch
///
/// Records are deduplicated by key with last-seen-wins semantics while the
/// original encounter order is preserved.
#[derive(Debug, Clone)]
pub struct RawBatch {
    /// World code the batch was fetched from
    pub world: String,

    /// Record kind of every row in the batch
    pub kind: RecordKind,

    /// Capture date stamped on every record at validation
    pub capture_date: NaiveDate,

    /// Deduplicated records in encounter order
    pub records: Vec<RawRecord>,
}

impl RawBatch {
    /// Number of records in the batch
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the batch holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// =============================================================================
// Validated Batch Structure
// =============================================================================

/// A batch that passed schema validation, ready for snapshot writing
#[derive(Debug, Clone)]
pub struct ValidatedBatch {
    /// World code the batch was fetched from
    pub world: String,

    /// Record kind of the frame
    pub kind: RecordKind,

    /// Typed frame in the kind's output column order
    pub frame: DataFrame,

    /// Raw records that entered validation
    pub rows_received: usize,

    /// Rows dropped for missing required fields
    pub rows_dropped: usize,
}

impl ValidatedBatch {
    /// Rows that survived validation
    pub fn rows(&self) -> usize {
        self.frame.height()
    }
}

// =============================================================================
// Server Table Row
// =============================================================================

/// One row of the cross-region server table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServerRow {
    /// World code as announced by the directory
    pub server: String,

    /// Base URL of the world; absent when the directory announced a dangling code
    pub url: Option<String>,

    /// Uppercased two-letter region code derived from the world code
    pub region: Option<String>,

    /// English region name; absent for codes without a known region
    pub region_name: Option<String>,
}

// =============================================================================
// Write Outcome Enumeration
// =============================================================================

/// Result of attempting to write one snapshot file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Snapshot file was created with the given row count
    Written { rows: usize },

    /// A snapshot for this world, kind and date already existed
    SkippedExisting,
}

impl WriteOutcome {
    /// Whether a file was created
    pub fn is_written(self) -> bool {
        matches!(self, WriteOutcome::Written { .. })
    }

    /// Rows written, zero for skipped snapshots
    pub fn rows_written(self) -> usize {
        match self {
            WriteOutcome::Written { rows } => rows,
            WriteOutcome::SkippedExisting => 0,
        }
    }
}
