//! End-to-end drags through the editor, checked with the layout audit.

use cutlayout_editor::{
    audit, DragOptions, DropOutcome, LayoutEditor, LayoutPayload, Point, PointerEvent,
};
use serde_json::json;

fn two_sheets() -> LayoutPayload {
    LayoutPayload::from_json_value(json!({
        "stock": { "w": 1000, "h": 500 },
        "kerf": 0,
        "sheets": [
            { "placements": [
                { "x": 0, "y": 0, "rect": { "w": 200, "h": 100 } },
                { "x": 200, "y": 0, "rect": { "w": 300, "h": 100 } }
            ] },
            { "placements": [
                { "x": 0, "y": 0, "rect": { "w": 500, "h": 500 } }
            ] }
        ]
    }))
    .unwrap()
}

fn editing(payload: LayoutPayload) -> LayoutEditor {
    let mut editor = LayoutEditor::new(Some(payload), None, DragOptions::default());
    editor.enter_edit_mode().unwrap();
    editor
}

#[test]
fn test_slide_fallback_against_neighbour() {
    let mut editor = editing(two_sheets());
    editor.pointer_down(PointerEvent::on_sheet(0, 200.0, 0.0));
    let frame = editor
        .pointer_move(PointerEvent::on_sheet(0, 0.0, 0.0))
        .unwrap();
    assert_eq!(frame.live_position, Point::new(200.0, 0.0));
    editor.pointer_up();

    let layout = editor.display_layout().unwrap();
    assert_eq!(layout.sheets[0].placements[1].position(), Point::new(200.0, 0.0));
    assert!(!editor.is_modified());
}

#[test]
fn test_vertical_slide_when_horizontal_is_blocked() {
    let payload = LayoutPayload::from_json_value(json!({
        "stock": { "w": 1000, "h": 500 },
        "kerf": 0,
        "sheets": [
            { "placements": [
                { "x": 0, "y": 0, "rect": { "w": 200, "h": 100 } },
                { "x": 0, "y": 200, "rect": { "w": 200, "h": 100 } },
                { "x": 250, "y": 200, "rect": { "w": 300, "h": 100 } }
            ] }
        ]
    }))
    .unwrap();
    let mut editor = editing(payload);

    assert_eq!(
        editor.pointer_down(PointerEvent::on_sheet(0, 260.0, 210.0)),
        Some((0, 2))
    );
    let frame = editor
        .pointer_move(PointerEvent::on_sheet(0, 160.0, 130.0))
        .unwrap();
    assert_eq!(frame.live_position, Point::new(250.0, 120.0));

    editor.pointer_up();
    let layout = editor.display_layout().unwrap();
    assert_eq!(layout.sheets[0].placements[2].position(), Point::new(250.0, 120.0));
    assert!(audit(layout).is_empty());
}

#[test]
fn test_cross_sheet_transfer_prunes_emptied_sheet() {
    let payload = LayoutPayload::from_json_value(json!({
        "stock": { "w": 1000, "h": 500 },
        "kerf": 0,
        "sheets": [
            { "placements": [ { "x": 0, "y": 0, "rect": { "w": 200, "h": 100 } } ] },
            { "placements": [ { "x": 0, "y": 0, "rect": { "w": 500, "h": 500 } } ] }
        ]
    }))
    .unwrap();
    let mut editor = editing(payload);

    editor.pointer_down(PointerEvent::on_sheet(0, 10.0, 10.0));
    let frame = editor
        .pointer_move(PointerEvent::on_sheet(1, 610.0, 210.0))
        .unwrap();
    assert!(frame.source_faded);
    assert!(frame.ghost.unwrap().valid);

    let outcome = editor.pointer_up().unwrap();
    let DropOutcome::Transferred { transfer, .. } = outcome else {
        panic!("expected a transfer, got {outcome:?}");
    };
    assert!(transfer.source_pruned);
    assert_eq!(transfer.sheet, 0);
    assert_eq!(transfer.position, Point::new(600.0, 200.0));

    let layout = editor.display_layout().unwrap();
    assert_eq!(layout.sheets.len(), 1);
    assert_eq!(layout.sheet_count, 1);
    assert_eq!(layout.sheets[0].waste_area, 500_000.0 - 250_000.0 - 20_000.0);
    assert!((layout.waste_percent - 46.0).abs() < 1e-9);
    assert!(audit(layout).is_empty());
    assert!(editor.is_modified());
}

#[test]
fn test_fractional_kerf_transfer_lands_beside_obstacle() {
    let payload = LayoutPayload::from_json_value(json!({
        "stock": { "w": 2000, "h": 1000 },
        "kerf": 0.1,
        "sheets": [
            { "placements": [ { "x": 1500, "y": 0, "rect": { "w": 150.1, "h": 100 } } ] },
            { "placements": [ { "x": 410.7, "y": 0, "rect": { "w": 500, "h": 1000 } } ] }
        ]
    }))
    .unwrap();
    let options = DragOptions {
        snap_to_whole_units: false,
        ..DragOptions::default()
    };
    let mut editor = LayoutEditor::new(Some(payload), None, options);
    editor.enter_edit_mode().unwrap();

    editor.pointer_down(PointerEvent::on_sheet(0, 1510.0, 10.0));
    let frame = editor
        .pointer_move(PointerEvent::on_sheet(1, 410.0, 110.0))
        .unwrap();
    let ghost = frame.ghost.unwrap();
    assert!(ghost.valid);
    assert!((ghost.position.x - 260.5).abs() < 1e-9);

    let outcome = editor.pointer_up().unwrap();
    let DropOutcome::Transferred { transfer, .. } = outcome else {
        panic!("expected a transfer, got {outcome:?}");
    };
    assert!(transfer.source_pruned);
    assert_eq!(transfer.sheet, 0);
    assert!((transfer.position.x - 260.5).abs() < 1e-9);
    assert_eq!(transfer.position.y, 100.0);

    let layout = editor.display_layout().unwrap();
    assert_eq!(layout.sheets.len(), 1);
    assert!(audit(layout).is_empty());
}

#[test]
fn test_transfer_to_earlier_sheet() {
    let payload = LayoutPayload::from_json_value(json!({
        "stock": { "w": 1000, "h": 500 },
        "kerf": 0,
        "sheets": [
            { "placements": [
                { "x": 0, "y": 0, "rect": { "w": 200, "h": 100 } },
                { "x": 200, "y": 0, "rect": { "w": 300, "h": 100 } }
            ] },
            { "placements": [ { "x": 0, "y": 0, "rect": { "w": 300, "h": 300 } } ] }
        ]
    }))
    .unwrap();
    let mut editor = editing(payload);

    editor.pointer_down(PointerEvent::on_sheet(1, 10.0, 10.0));
    editor.pointer_move(PointerEvent::on_sheet(0, 610.0, 210.0));
    assert_eq!(editor.ghost().unwrap().sheet, 0);

    let Some(DropOutcome::Transferred { from_sheet, transfer, .. }) = editor.pointer_up() else {
        panic!("expected a transfer");
    };
    assert_eq!(from_sheet, 1);
    assert_eq!(transfer.sheet, 0);
    assert_eq!(transfer.index, 2);
    assert!(transfer.source_pruned);

    let layout = editor.display_layout().unwrap();
    assert_eq!(layout.sheets.len(), 1);
    assert_eq!(layout.sheets[0].placements[2].position(), Point::new(600.0, 200.0));
    assert!(audit(layout).is_empty());
}

#[test]
fn test_drop_onto_full_sheet_is_refused() {
    let mut editor = editing(two_sheets());
    editor.pointer_down(PointerEvent::on_sheet(1, 10.0, 10.0));
    editor.pointer_move(PointerEvent::on_sheet(0, 10.0, 10.0));
    assert!(!editor.ghost().unwrap().valid);

    let outcome = editor.pointer_up().unwrap();
    assert!(matches!(outcome, DropOutcome::Rejected { sheet: 1, index: 0, .. }));
    assert_eq!(editor.display_layout().unwrap().sheets.len(), 2);
    assert!(!editor.is_modified());
}

#[test]
fn test_invalid_drop_is_noop() {
    let payload = LayoutPayload::from_json_value(json!({
        "stock": { "w": 1000, "h": 500 },
        "kerf": 3,
        "sheets": [
            { "placements": [ { "x": 0, "y": 0, "rect": { "w": 600, "h": 400 } } ] },
            { "placements": [
                { "x": 0, "y": 0, "rect": { "w": 500, "h": 500 } },
                { "x": 503, "y": 0, "rect": { "w": 497, "h": 500 } }
            ] }
        ]
    }))
    .unwrap();
    let mut editor = editing(payload);
    let before = editor.display_layout().unwrap().clone();

    editor.pointer_down(PointerEvent::on_sheet(0, 300.0, 200.0));
    let frame = editor
        .pointer_move(PointerEvent::on_sheet(1, 500.0, 250.0))
        .unwrap();
    assert!(!frame.ghost.unwrap().valid);

    assert_eq!(
        editor.pointer_up(),
        Some(DropOutcome::Rejected {
            sheet: 0,
            index: 0,
            origin: Point::new(0.0, 0.0),
        })
    );
    assert_eq!(editor.display_layout().unwrap(), &before);
    assert!(!editor.is_dragging());
    assert_eq!(editor.ghost(), None);
}

#[test]
fn test_second_pointer_down_during_drag_is_ignored() {
    let mut editor = editing(two_sheets());
    assert_eq!(
        editor.pointer_down(PointerEvent::on_sheet(0, 10.0, 10.0)),
        Some((0, 0))
    );
    assert_eq!(editor.pointer_down(PointerEvent::on_sheet(0, 300.0, 10.0)), None);
    editor.pointer_move(PointerEvent::on_sheet(0, 10.0, 310.0));
    editor.pointer_up();

    let layout = editor.display_layout().unwrap();
    assert_eq!(layout.sheets[0].placements[0].position(), Point::new(0.0, 300.0));
    assert_eq!(layout.sheets[0].placements[1].position(), Point::new(200.0, 0.0));
}
