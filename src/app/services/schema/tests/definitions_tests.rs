//! Tests for the fixed schema definitions

use crate::app::models::RecordKind;
use crate::app::services::record_parser::RecordLayout;
use crate::app::services::schema::{ColumnType, KindSchema};
use crate::constants::columns;

#[test]
fn test_every_schema_ends_with_stamp_columns() {
    for kind in RecordKind::all() {
        let schema = KindSchema::for_kind(kind);
        let names = schema.column_names();
        let len = names.len();

        assert_eq!(names[len - 2], columns::DATETIME);
        assert_eq!(names[len - 1], columns::SERVER);

        let datetime = &schema.columns[len - 2];
        let server = &schema.columns[len - 1];
        assert!(datetime.required);
        assert_eq!(datetime.dtype, ColumnType::Date);
        assert!(server.required);
        assert_eq!(server.dtype, ColumnType::Utf8);
    }
}

#[test]
fn test_id_column_is_required_for_every_kind() {
    for kind in RecordKind::all() {
        let schema = KindSchema::for_kind(kind);
        let id_spec = schema
            .columns
            .iter()
            .find(|spec| spec.name == kind.id_column())
            .unwrap();
        assert!(id_spec.required, "{} id column must be required", kind);
        assert_eq!(id_spec.dtype, ColumnType::Int64);
    }
}

#[test]
fn test_value_columns_match_parser_layout() {
    for kind in RecordKind::all() {
        let schema = KindSchema::for_kind(kind);
        let layout = RecordLayout::for_kind(kind);

        let schema_names: Vec<&str> = schema
            .value_columns()
            .iter()
            .map(|spec| spec.name)
            .collect();
        assert_eq!(
            schema_names, layout.output_columns,
            "{} schema must cover exactly the parser's output columns",
            kind
        );
    }
}

#[test]
fn test_village_continent_is_an_integer_column() {
    let schema = KindSchema::for_kind(RecordKind::Village);
    let continent = schema
        .columns
        .iter()
        .find(|spec| spec.name == columns::CONTINENT)
        .unwrap();
    assert_eq!(continent.dtype, ColumnType::Int64);
    assert!(!continent.required);
}

#[test]
fn test_ranking_schema_requires_player_not_rank() {
    let schema = KindSchema::for_kind(RecordKind::Offense);
    assert_eq!(
        schema.column_names(),
        vec![
            columns::RANK,
            columns::PLAYER_ID,
            columns::POINTS,
            columns::DATETIME,
            columns::SERVER
        ]
    );

    let rank = &schema.columns[0];
    let player = &schema.columns[1];
    assert!(!rank.required);
    assert!(player.required);

    // Offense and defense share the ranking schema
    let defense = KindSchema::for_kind(RecordKind::Defense);
    assert_eq!(defense.column_names(), schema.column_names());
}

#[test]
fn test_required_columns_iterator() {
    let schema = KindSchema::for_kind(RecordKind::Player);
    let required: Vec<&str> = schema.required_columns().map(|spec| spec.name).collect();
    assert_eq!(
        required,
        vec![columns::PLAYER_ID, columns::DATETIME, columns::SERVER]
    );
}
