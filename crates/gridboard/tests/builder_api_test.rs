//! Integration tests for the LayoutBuilder and Board APIs
//!
//! These tests drive a board through a typical editing session using only the
//! public API.

use gridboard::{
    GridboardError, LayoutBuilder,
    breakpoint::Breakpoint,
    config::AppConfig,
    diagnostic::ErrorCode,
    geometry::{GridPosition, GridSize},
    identifier::WidgetId,
};

const DASHBOARD: &str = r#"
breakpoint = "desktop"

[[widgets]]
id = "clock"
order = 0
position = { col = 0, row = 0, width = 2, height = 1 }

[[widgets]]
id = "weather"
order = 1000
position = { col = 2, row = 0, width = 4, height = 2 }

[[widgets]]
id = "radio"
order = 2000
position = { col = 6, row = 0, width = 2, height = 1 }
"#;

fn ids(board: &gridboard::Board) -> Vec<String> {
    board.widgets().map(|w| w.id().to_string()).collect()
}

#[test]
fn test_load_valid_layout() {
    let builder = LayoutBuilder::default();
    let result = builder.load(DASHBOARD);
    assert!(result.is_ok(), "Should load valid layout: {:?}", result.err());

    let board = result.unwrap();
    assert_eq!(board.columns(), 8);
    assert_eq!(ids(&board), ["clock", "weather", "radio"]);
}

#[test]
fn test_check_reports_without_failing() {
    let source = r#"
        [[widgets]]
        id = "a"
        order = 0
        position = { col = 0, row = 0, width = 2, height = 2 }

        [[widgets]]
        id = "b"
        order = 1
        position = { col = 1, row = 1, width = 2, height = 2 }
    "#;

    let diagnostics = LayoutBuilder::default()
        .check(source)
        .expect("Failed to parse layout");
    let codes: Vec<_> = diagnostics.iter().filter_map(|d| d.code()).collect();
    assert_eq!(codes, [ErrorCode::E204, ErrorCode::W300]);

    let err = LayoutBuilder::default().load(source).unwrap_err();
    assert!(matches!(err, GridboardError::Layout { .. }));
}

#[test]
fn test_load_invalid_syntax_keeps_source() {
    let source = "[[widgets]\nid = ";
    let err = LayoutBuilder::default().load(source).unwrap_err();

    match err {
        GridboardError::Layout { err, src } => {
            assert_eq!(src, source);
            assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E100));
        }
        other => panic!("Expected layout error, got {other:?}"),
    }
}

#[test]
fn test_editing_session() {
    let builder = LayoutBuilder::default();
    let mut board = builder.load(DASHBOARD).expect("Failed to load");

    // Drop a new widget between the clock and the weather widget
    let change = board
        .insert_at(WidgetId::new("notes"), GridSize::new(2, 1), 1)
        .expect("Failed to insert");
    assert_eq!(change.keys().len(), 1);
    assert_eq!(change.keys()[0].key().value(), 500);
    assert_eq!(
        change.positions()[0].position(),
        GridPosition::new(0, 1, 2, 1)
    );
    assert_eq!(ids(&board), ["clock", "notes", "weather", "radio"]);

    // Drag the radio to the front
    board.reorder(WidgetId::new("radio"), 0).expect("Failed to reorder");
    assert_eq!(ids(&board), ["radio", "clock", "notes", "weather"]);

    // Moving onto the weather widget is rejected
    let result = board.move_to(WidgetId::new("radio"), GridPosition::new(4, 1, 2, 1));
    assert!(result.is_err());

    board.remove(WidgetId::new("clock")).expect("Failed to remove");

    // The saved layout loads back to the same board
    let saved = builder.save(&board).expect("Failed to save");
    let reloaded = builder.load(&saved).expect("Failed to reload");
    let before: Vec<_> = board.widgets().copied().collect();
    let after: Vec<_> = reloaded.widgets().copied().collect();
    assert_eq!(before, after);
}

#[test]
fn test_switch_to_mobile() {
    let config = AppConfig::default();
    let builder = LayoutBuilder::new(config.clone());
    let mut board = builder.load(DASHBOARD).expect("Failed to load");

    board.set_columns(config.grid().columns(Breakpoint::Mobile));

    let positions: Vec<_> = board
        .widgets()
        .map(|w| w.position().expect("Widget should be placed"))
        .collect();
    assert_eq!(
        positions,
        [
            GridPosition::new(0, 0, 2, 1),
            GridPosition::new(0, 1, 2, 2),
            GridPosition::new(0, 3, 2, 1),
        ]
    );
}

#[test]
fn test_builder_reusability() {
    let builder = LayoutBuilder::default();

    let first = builder.load("columns = 2").expect("Failed to load first");
    let second = builder.load(DASHBOARD).expect("Failed to load second");

    assert!(first.is_empty());
    assert_eq!(second.len(), 3);
}
