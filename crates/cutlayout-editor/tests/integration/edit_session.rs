//! Edit-session lifecycle against the in-memory gateway.

use cutlayout_editor::{
    DragOptions, EditorError, LayoutEditor, LayoutPayload, MemoryGateway, Point, PointerEvent,
};
use serde_json::json;

fn original() -> LayoutPayload {
    LayoutPayload::from_json_value(json!({
        "stock": { "w": 1000, "h": 500 },
        "kerf": 3,
        "pieces": [ { "length": 300, "width": 100, "quantity": 1, "label": "Rail" } ],
        "sheets": [
            { "placements": [
                { "x": 0, "y": 0, "rect": { "w": 200, "h": 100 } },
                { "x": 203, "y": 0, "rect": { "w": 300, "h": 100 } }
            ] },
            { "placements": [ { "x": 0, "y": 0, "rect": { "w": 100, "h": 100 } } ] }
        ],
        "job_id": 77
    }))
    .unwrap()
}

fn move_rail(editor: &mut LayoutEditor) {
    editor.pointer_down(PointerEvent::on_sheet(0, 213.0, 10.0));
    editor.pointer_move(PointerEvent::on_sheet(0, 610.0, 310.0));
    editor.pointer_up();
}

#[tokio::test]
async fn test_save_failure_retains_edits_and_retry_succeeds() {
    let gateway = MemoryGateway::new();
    let mut editor = LayoutEditor::new(Some(original()), None, DragOptions::default());
    editor.enter_edit_mode().unwrap();
    move_rail(&mut editor);
    let working = editor.display_layout().unwrap().clone();

    gateway.fail_next_saves(1);
    let err = editor.save(&gateway).await.unwrap_err();
    assert!(matches!(err, EditorError::Persistence(_)));
    assert!(editor.is_editing());
    assert!(!editor.is_saving());
    assert_eq!(editor.display_layout().unwrap(), &working);
    assert!(gateway.stored().is_none());
    assert!(!editor.has_edits());

    editor.save(&gateway).await.unwrap();
    assert!(!editor.is_editing());
    assert_eq!(editor.authoritative().unwrap(), &working);

    let stored = gateway.stored().unwrap();
    assert_eq!(stored.extra["job_id"], json!(77));
    assert_eq!(stored.sheets.unwrap()[0].placements[1].x, 600.0);
}

#[tokio::test]
async fn test_reset_is_idempotent() {
    let gateway = MemoryGateway::new();
    let mut editor = LayoutEditor::new(Some(original()), None, DragOptions::default());
    let original = editor.original().unwrap().clone();

    editor.enter_edit_mode().unwrap();
    move_rail(&mut editor);
    editor.save(&gateway).await.unwrap();
    assert_ne!(editor.authoritative().unwrap(), &original);

    editor.reset(&gateway).await.unwrap();
    assert_eq!(editor.authoritative().unwrap(), &original);
    editor.reset(&gateway).await.unwrap();
    assert_eq!(editor.authoritative().unwrap(), &original);
    assert!(!editor.has_edits());
}

#[tokio::test]
async fn test_reset_discards_working_copy() {
    let gateway = MemoryGateway::new();
    let mut editor = LayoutEditor::new(Some(original()), Some(original()), DragOptions::default());
    editor.enter_edit_mode().unwrap();
    move_rail(&mut editor);

    editor.reset(&gateway).await.unwrap();
    assert!(!editor.is_editing());
    assert_eq!(
        editor.display_layout().unwrap().sheets[0].placements[1].position(),
        Point::new(203.0, 0.0)
    );
}

#[test]
fn test_edited_layout_reopens_for_editing() {
    let mut editor = LayoutEditor::new(Some(original()), None, DragOptions::default());
    editor.enter_edit_mode().unwrap();
    move_rail(&mut editor);
    let request = editor.begin_save().unwrap();
    editor.complete_save(request.id, Ok(())).unwrap();

    let first = editor.enter_edit_mode().unwrap();
    assert_eq!(editor.enter_edit_mode().unwrap(), first);
    assert_eq!(
        editor.display_layout().unwrap().sheets[0].placements[1].position(),
        Point::new(600.0, 300.0)
    );
    assert!(!editor.is_modified());
}

#[test]
fn test_lookup_labels_survive_edits() {
    let mut editor = LayoutEditor::new(Some(original()), None, DragOptions::default());
    let key = editor.authoritative().unwrap().sheets[0].placements[1]
        .piece_key
        .clone();
    assert_eq!(editor.lookup().label(&key), Some("Rail"));

    editor.enter_edit_mode().unwrap();
    move_rail(&mut editor);
    let request = editor.begin_save().unwrap();
    editor.complete_save(request.id, Ok(())).unwrap();
    assert_eq!(editor.lookup().label(&key), Some("Rail"));
}
