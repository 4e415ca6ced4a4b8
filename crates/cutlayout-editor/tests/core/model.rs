use cutlayout_editor::{audit, model, LayoutPayload};
use serde_json::json;

const OPTIMIZER_RESULT: &str = r#"{
    "stock": { "length": 2440, "width": 1220 },
    "kerf": 3.2,
    "pieces": [
        { "length": 600, "width": 400, "quantity": 2, "label": "Door" },
        { "length": "1200", "width": "300", "quantity": "1" }
    ],
    "sheets": [
        {
            "placements": [
                { "x": 0, "y": 0, "rect": { "w": 600, "h": 400 }, "rotated": false },
                { "x": 604, "y": 0, "rect": { "w": 400, "h": 600 }, "rotated": true }
            ],
            "waste_area": 2496800
        },
        {
            "placements": [
                { "x": 0, "y": 0, "rect": { "w": 1200, "h": 300 }, "rotated": false, "grain": "long" }
            ],
            "waste_area": 2616800
        }
    ],
    "sheet_count": 2,
    "waste_percent": 85.89,
    "algorithm": "guillotine",
    "elapsed_ms": 41
}"#;

#[test]
fn test_optimizer_payload_loads_cleanly() {
    let layout = model::load_json(OPTIMIZER_RESULT).unwrap();
    assert_eq!(layout.stock.width, 2440.0);
    assert_eq!(layout.stock.height, 1220.0);
    assert_eq!(layout.placement_count(), 3);
    assert_eq!(layout.pieces[1].length, 1200.0);
    assert!(audit(&layout).is_empty(), "{:?}", audit(&layout));
}

#[test]
fn test_unknown_fields_survive_round_trip() {
    let layout = model::load_json(OPTIMIZER_RESULT).unwrap();
    let payload = layout.to_payload();
    let value = serde_json::to_value(&payload).unwrap();

    assert_eq!(value["algorithm"], json!("guillotine"));
    assert_eq!(value["elapsed_ms"], json!(41));
    assert_eq!(value["sheets"][1]["placements"][0]["grain"], json!("long"));

    let reloaded = model::load(LayoutPayload::from_json_value(value).unwrap()).unwrap();
    assert_eq!(reloaded, layout);
}

#[test]
fn test_degenerate_placement_is_rejected() {
    let err = model::load_value(json!({
        "stock": { "w": 100, "h": 100 },
        "sheets": [{ "placements": [{ "x": 0, "y": 0, "rect": { "w": 0, "h": 10 } }] }]
    }))
    .unwrap_err();
    assert!(matches!(
        err,
        cutlayout_core::LayoutError::InvalidPlacement { sheet: 0, index: 0, .. }
    ));
}
