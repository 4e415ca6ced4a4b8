use cutlayout_editor::{
    has_collision, resolve_push_placement, resolve_same_sheet_move, Obstacles, Placement, Point,
    Rect, Stock,
};

fn place(w: f64, h: f64, x: f64, y: f64) -> Placement {
    Placement::new(Rect::new(w, h), x, y, false)
}

#[test]
fn test_slide_fallback_keeps_piece_beside_neighbour() {
    let stock = Stock::new(1000.0, 500.0);
    let sheet = vec![place(200.0, 100.0, 0.0, 0.0), place(300.0, 100.0, 200.0, 0.0)];

    let resolved = resolve_same_sheet_move(
        Point::new(0.0, 0.0),
        &sheet[1].rect,
        0.0,
        Obstacles::excluding(&sheet, 1),
        &stock,
        Point::new(200.0, 0.0),
    );
    assert_eq!(resolved, Point::new(200.0, 0.0));
}

#[test]
fn test_free_space_move_is_deterministic() {
    let stock = Stock::new(1000.0, 500.0);
    let sheet = vec![place(200.0, 100.0, 0.0, 0.0), place(300.0, 100.0, 200.0, 0.0)];
    let run = || {
        resolve_same_sheet_move(
            Point::new(450.0, 250.0),
            &sheet[1].rect,
            3.0,
            Obstacles::excluding(&sheet, 1),
            &stock,
            Point::new(200.0, 0.0),
        )
    };
    assert_eq!(run(), Point::new(450.0, 250.0));
    assert_eq!(run(), run());
}

#[test]
fn test_drag_past_the_edge_is_clamped() {
    let stock = Stock::new(1000.0, 500.0);
    let sheet = vec![place(300.0, 100.0, 200.0, 0.0)];
    let resolved = resolve_same_sheet_move(
        Point::new(900.0, -40.0),
        &sheet[0].rect,
        0.0,
        Obstacles::excluding(&sheet, 0),
        &stock,
        Point::new(200.0, 0.0),
    );
    assert_eq!(resolved, Point::new(700.0, 0.0));
}

#[test]
fn test_push_respects_kerf() {
    let stock = Stock::new(1000.0, 500.0);
    let target_sheet = vec![place(400.0, 400.0, 0.0, 0.0)];
    let moving = Rect::new(200.0, 100.0);

    let resolved = resolve_push_placement(
        Point::new(350.0, 100.0),
        &moving,
        5.0,
        Obstacles::all(&target_sheet),
        &stock,
        3,
    )
    .unwrap();
    assert_eq!(resolved, Point::new(405.0, 100.0));
    assert!(!has_collision(
        resolved.x,
        resolved.y,
        moving.width,
        moving.height,
        Obstacles::all(&target_sheet),
        5.0
    ));
}

#[test]
fn test_push_gives_up_after_pass_budget() {
    let stock = Stock::new(1000.0, 500.0);
    let target_sheet = vec![
        place(490.0, 500.0, 0.0, 0.0),
        place(490.0, 500.0, 510.0, 0.0),
    ];
    let moving = Rect::new(100.0, 100.0);
    assert_eq!(
        resolve_push_placement(
            Point::new(450.0, 200.0),
            &moving,
            0.0,
            Obstacles::all(&target_sheet),
            &stock,
            3,
        ),
        None
    );
}
