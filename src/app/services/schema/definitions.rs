//! Fixed output schemas for the snapshot kinds
//!
//! Every kind writes the same column set in the same order on every world
//! and every day. The schemas mirror the wire layouts plus the derived
//! continent column and the two stamp columns appended during validation.

use crate::app::models::RecordKind;
use crate::constants::columns;

use polars::prelude::DataType;

/// Column data types used by the snapshot schemas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Nullable 64-bit integer, coerced non-strictly from text
    Int64,
    /// UTF-8 text
    Utf8,
    /// Day-granularity date parsed from `%Y-%m-%d`
    Date,
}

impl ColumnType {
    /// Corresponding polars data type
    pub fn dtype(self) -> DataType {
        match self {
            ColumnType::Int64 => DataType::Int64,
            ColumnType::Utf8 => DataType::String,
            ColumnType::Date => DataType::Date,
        }
    }
}

/// One column of a snapshot schema
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    /// Output column name
    pub name: &'static str,

    /// Data type after coercion
    pub dtype: ColumnType,

    /// Required columns must be non-null in every surviving row
    pub required: bool,
}

const fn required(name: &'static str, dtype: ColumnType) -> ColumnSpec {
    ColumnSpec {
        name,
        dtype,
        required: true,
    }
}

const fn optional(name: &'static str, dtype: ColumnType) -> ColumnSpec {
    ColumnSpec {
        name,
        dtype,
        required: false,
    }
}

/// Full fixed schema of one record kind, stamp columns included
#[derive(Debug, Clone, Copy)]
pub struct KindSchema {
    /// Columns in output order; the final two are always datetime and server
    pub columns: &'static [ColumnSpec],
}

static VILLAGE_SCHEMA: KindSchema = KindSchema {
    columns: &[
        required(columns::VILLAGE_ID, ColumnType::Int64),
        optional(columns::NAME, ColumnType::Utf8),
        optional(columns::X, ColumnType::Int64),
        optional(columns::Y, ColumnType::Int64),
        optional(columns::CONTINENT, ColumnType::Int64),
        optional(columns::PLAYER_ID, ColumnType::Int64),
        optional(columns::POINTS, ColumnType::Int64),
        required(columns::DATETIME, ColumnType::Date),
        required(columns::SERVER, ColumnType::Utf8),
    ],
};

static PLAYER_SCHEMA: KindSchema = KindSchema {
    columns: &[
        required(columns::PLAYER_ID, ColumnType::Int64),
        optional(columns::NAME, ColumnType::Utf8),
        optional(columns::ALLY_ID, ColumnType::Int64),
        optional(columns::NUM_VILLAGES, ColumnType::Int64),
        optional(columns::POINTS, ColumnType::Int64),
        optional(columns::RANK, ColumnType::Int64),
        required(columns::DATETIME, ColumnType::Date),
        required(columns::SERVER, ColumnType::Utf8),
    ],
};

static ALLY_SCHEMA: KindSchema = KindSchema {
    columns: &[
        required(columns::ALLY_ID, ColumnType::Int64),
        optional(columns::NAME, ColumnType::Utf8),
        optional(columns::TAG, ColumnType::Utf8),
        optional(columns::MEMBERS, ColumnType::Int64),
        optional(columns::NUM_VILLAGES, ColumnType::Int64),
        optional(columns::POINTS, ColumnType::Int64),
        optional(columns::TOTAL_POINTS, ColumnType::Int64),
        optional(columns::RANK, ColumnType::Int64),
        required(columns::DATETIME, ColumnType::Date),
        required(columns::SERVER, ColumnType::Utf8),
    ],
};

static RANKING_SCHEMA: KindSchema = KindSchema {
    columns: &[
        optional(columns::RANK, ColumnType::Int64),
        required(columns::PLAYER_ID, ColumnType::Int64),
        optional(columns::POINTS, ColumnType::Int64),
        required(columns::DATETIME, ColumnType::Date),
        required(columns::SERVER, ColumnType::Utf8),
    ],
};

impl KindSchema {
    /// Schema for one record kind
    pub fn for_kind(kind: RecordKind) -> &'static KindSchema {
        match kind {
            RecordKind::Village => &VILLAGE_SCHEMA,
            RecordKind::Player => &PLAYER_SCHEMA,
            RecordKind::Ally => &ALLY_SCHEMA,
            RecordKind::Offense | RecordKind::Defense => &RANKING_SCHEMA,
        }
    }

    /// Columns populated from parsed record values, stamp columns excluded
    pub fn value_columns(&self) -> &'static [ColumnSpec] {
        &self.columns[..self.columns.len() - 2]
    }

    /// Columns that must be non-null in every surviving row
    pub fn required_columns(&self) -> impl Iterator<Item = &'static ColumnSpec> {
        self.columns.iter().filter(|spec| spec.required)
    }

    /// Output column names in order
    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|spec| spec.name).collect()
    }
}
