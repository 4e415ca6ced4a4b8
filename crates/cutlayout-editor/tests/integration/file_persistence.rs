use cutlayout_editor::{DragOptions, FileGateway, LayoutEditor, LayoutPayload, PointerEvent};
use serde_json::json;

fn original() -> LayoutPayload {
    LayoutPayload::from_json_value(json!({
        "stock": { "w": 1000, "h": 500 },
        "kerf": 0,
        "sheets": [
            { "placements": [ { "x": 0, "y": 0, "rect": { "w": 200, "h": 100 } } ] }
        ]
    }))
    .unwrap()
}

#[tokio::test]
async fn test_saved_file_reloads_as_edited_layout() {
    let dir = tempfile::tempdir().unwrap();
    let gateway = FileGateway::new(dir.path().join("edited.json"));

    let mut editor = LayoutEditor::new(Some(original()), None, DragOptions::default());
    editor.enter_edit_mode().unwrap();
    editor.pointer_down(PointerEvent::on_sheet(0, 10.0, 10.0));
    editor.pointer_move(PointerEvent::on_sheet(0, 410.5, 210.2));
    editor.pointer_up();
    editor.save(&gateway).await.unwrap();

    let saved = gateway.load().await.unwrap().unwrap();
    let reopened = LayoutEditor::new(Some(original()), Some(saved.layout), DragOptions::default());
    assert!(reopened.has_edits());
    assert_eq!(reopened.authoritative(), editor.authoritative());
    assert_eq!(
        reopened.authoritative().unwrap().sheets[0].placements[0].x,
        401.0
    );

    editor.reset(&gateway).await.unwrap();
    assert!(gateway.load().await.unwrap().is_none());
}

#[tokio::test]
async fn test_unreadable_save_location_keeps_edits() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "x").unwrap();
    let gateway = FileGateway::new(blocker.join("edited.json"));

    let mut editor = LayoutEditor::new(Some(original()), None, DragOptions::default());
    editor.enter_edit_mode().unwrap();
    editor.pointer_down(PointerEvent::on_sheet(0, 10.0, 10.0));
    editor.pointer_move(PointerEvent::on_sheet(0, 310.0, 10.0));
    editor.pointer_up();
    let working = editor.display_layout().unwrap().clone();

    assert!(editor.save(&gateway).await.is_err());
    assert!(editor.is_editing());
    assert_eq!(editor.display_layout().unwrap(), &working);
}
