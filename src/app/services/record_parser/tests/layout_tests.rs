//! Tests for the fixed column layouts

use crate::app::models::RecordKind;
use crate::app::services::record_parser::RecordLayout;
use crate::constants::columns;

#[test]
fn test_village_layout_derives_continent() {
    let layout = RecordLayout::for_kind(RecordKind::Village);

    assert_eq!(layout.wire_columns.len(), 6);
    assert_eq!(layout.output_width(), 7);

    // Continent sits between y and player_id in the output order
    assert_eq!(layout.output_columns[3], columns::Y);
    assert_eq!(layout.output_columns[4], columns::CONTINENT);
    assert_eq!(layout.output_columns[5], columns::PLAYER_ID);

    // Continent is derived, not copied from the wire
    assert_eq!(layout.wire_position(columns::CONTINENT), None);
    assert_eq!(layout.wire_position(columns::X), Some(2));
    assert_eq!(layout.wire_position(columns::Y), Some(3));
}

#[test]
fn test_player_and_ally_layouts_mirror_the_wire() {
    for kind in [RecordKind::Player, RecordKind::Ally] {
        let layout = RecordLayout::for_kind(kind);
        assert_eq!(layout.wire_columns, layout.output_columns);
    }

    let ally = RecordLayout::for_kind(RecordKind::Ally);
    assert_eq!(ally.output_width(), 8);
    assert_eq!(ally.wire_position(columns::TAG), Some(2));
    assert_eq!(ally.wire_position(columns::TOTAL_POINTS), Some(6));
}

#[test]
fn test_ranking_kinds_share_one_layout() {
    let offense = RecordLayout::for_kind(RecordKind::Offense);
    let defense = RecordLayout::for_kind(RecordKind::Defense);

    assert_eq!(offense.output_columns, defense.output_columns);
    assert_eq!(
        offense.output_columns,
        &[columns::RANK, columns::PLAYER_ID, columns::POINTS]
    );
    assert_eq!(offense.wire_position(columns::PLAYER_ID), Some(1));
}

#[test]
fn test_key_column_is_part_of_every_layout() {
    for kind in RecordKind::all() {
        let layout = RecordLayout::for_kind(kind);
        assert_eq!(
            layout.wire_position(kind.id_column()),
            Some(kind.key_index()),
            "key column of {} must sit at its key index",
            kind
        );
    }
}
