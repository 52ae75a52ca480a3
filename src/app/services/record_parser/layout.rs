//! Positional column layouts for the map exports
//!
//! The game publishes headerless comma-delimited rows; meaning is carried
//! entirely by position. Each kind has a wire layout and an output layout;
//! the two differ only where a column is derived rather than copied.

use crate::app::models::RecordKind;
use crate::constants::columns;

/// Wire and output column layout of one record kind
#[derive(Debug, Clone, Copy)]
pub struct RecordLayout {
    /// Output column names at their wire positions
    pub wire_columns: &'static [&'static str],

    /// Full output column order, stamp columns excluded
    pub output_columns: &'static [&'static str],
}

static VILLAGE_LAYOUT: RecordLayout = RecordLayout {
    wire_columns: &[
        columns::VILLAGE_ID,
        columns::NAME,
        columns::X,
        columns::Y,
        columns::PLAYER_ID,
        columns::POINTS,
    ],
    output_columns: &[
        columns::VILLAGE_ID,
        columns::NAME,
        columns::X,
        columns::Y,
        columns::CONTINENT,
        columns::PLAYER_ID,
        columns::POINTS,
    ],
};

static PLAYER_LAYOUT: RecordLayout = RecordLayout {
    wire_columns: &[
        columns::PLAYER_ID,
        columns::NAME,
        columns::ALLY_ID,
        columns::NUM_VILLAGES,
        columns::POINTS,
        columns::RANK,
    ],
    output_columns: &[
        columns::PLAYER_ID,
        columns::NAME,
        columns::ALLY_ID,
        columns::NUM_VILLAGES,
        columns::POINTS,
        columns::RANK,
    ],
};

static ALLY_LAYOUT: RecordLayout = RecordLayout {
    wire_columns: &[
        columns::ALLY_ID,
        columns::NAME,
        columns::TAG,
        columns::MEMBERS,
        columns::NUM_VILLAGES,
        columns::POINTS,
        columns::TOTAL_POINTS,
        columns::RANK,
    ],
    output_columns: &[
        columns::ALLY_ID,
        columns::NAME,
        columns::TAG,
        columns::MEMBERS,
        columns::NUM_VILLAGES,
        columns::POINTS,
        columns::TOTAL_POINTS,
        columns::RANK,
    ],
};

static RANKING_LAYOUT: RecordLayout = RecordLayout {
    wire_columns: &[columns::RANK, columns::PLAYER_ID, columns::POINTS],
    output_columns: &[columns::RANK, columns::PLAYER_ID, columns::POINTS],
};

impl RecordLayout {
    /// Layout for one record kind
    pub fn for_kind(kind: RecordKind) -> &'static RecordLayout {
        match kind {
            RecordKind::Village => &VILLAGE_LAYOUT,
            RecordKind::Player => &PLAYER_LAYOUT,
            RecordKind::Ally => &ALLY_LAYOUT,
            RecordKind::Offense | RecordKind::Defense => &RANKING_LAYOUT,
        }
    }

    /// Wire position of an output column, if it is copied from the wire
    pub fn wire_position(&self, name: &str) -> Option<usize> {
        self.wire_columns.iter().position(|c| *c == name)
    }

    /// Number of output columns, stamp columns excluded
    pub fn output_width(&self) -> usize {
        self.output_columns.len()
    }
}
