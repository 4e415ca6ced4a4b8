//! Collision resolution for dragged pieces.
//!
//! Pure geometry with no rendering or model dependency. Overlap testing
//! expands each footprint by the kerf on its far edges; two pieces separated
//! by exactly one kerf are considered clear.
//!
//! Two search strategies produce candidate positions:
//! - [`resolve_same_sheet_move`] slides along obstacles, falling back to the
//!   last valid position for the frame.
//! - [`resolve_push_placement`] pushes a dropped piece out of whatever it lands
//!   on, used when there is no previous position on the target sheet.
//!
//! Whatever a strategy returns, [`has_collision`] is the final authority.

use cutlayout_core::{Bounds, Placement, Point, Rect, Stock};

/// Default pass budget for [`resolve_push_placement`].
pub const DEFAULT_MAX_PUSH_PASSES: u32 = 3;

/// The placements a moving piece must avoid.
///
/// Borrows a sheet's placement list and optionally skips the moving piece
/// itself, so callers never copy the list to exclude one entry.
#[derive(Debug, Clone, Copy)]
pub struct Obstacles<'a> {
    placements: &'a [Placement],
    skip: Option<usize>,
}

impl<'a> Obstacles<'a> {
    /// Every placement is an obstacle.
    pub fn all(placements: &'a [Placement]) -> Self {
        Self {
            placements,
            skip: None,
        }
    }

    /// Every placement except the one at `index`.
    pub fn excluding(placements: &'a [Placement], index: usize) -> Self {
        Self {
            placements,
            skip: Some(index),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Placement> + 'a {
        let skip = self.skip;
        self.placements
            .iter()
            .enumerate()
            .filter(move |(i, _)| Some(*i) != skip)
            .map(|(_, p)| p)
    }
}

/// Whether two placements overlap once expanded by `kerf`.
pub fn overlaps(a: &Placement, b: &Placement, kerf: f64) -> bool {
    a.bounds().intersects_with_margin(&b.bounds(), kerf)
}

/// Whether a `w`×`h` footprint at `(x, y)` overlaps any obstacle.
pub fn has_collision(x: f64, y: f64, w: f64, h: f64, others: Obstacles<'_>, kerf: f64) -> bool {
    let candidate = Bounds::new(x, y, x + w, y + h);
    others
        .iter()
        .any(|other| candidate.intersects_with_margin(&other.bounds(), kerf))
}

/// Clamps a piece origin so the footprint stays on the stock.
pub fn clamp_to_stock(point: Point, rect: &Rect, stock: &Stock) -> Point {
    Point::new(
        point.x.min(stock.width - rect.width).max(0.0),
        point.y.min(stock.height - rect.height).max(0.0),
    )
}

/// Resolves one drag frame on the piece's own sheet.
///
/// Tries the clamped target, then a horizontal slide holding the last valid
/// `y`, then a vertical slide holding the last valid `x`. If all three collide
/// the piece stays at `last_valid` for this frame.
pub fn resolve_same_sheet_move(
    target: Point,
    moving: &Rect,
    kerf: f64,
    others: Obstacles<'_>,
    stock: &Stock,
    last_valid: Point,
) -> Point {
    let clamped = clamp_to_stock(target, moving, stock);
    let candidates = [
        clamped,
        Point::new(clamped.x, last_valid.y),
        Point::new(last_valid.x, clamped.y),
    ];

    candidates
        .into_iter()
        .find(|c| !has_collision(c.x, c.y, moving.width, moving.height, others, kerf))
        .unwrap_or(last_valid)
}

/// Single-axis translation that clears one obstacle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Push {
    Right,
    Left,
    Down,
    Up,
}

/// Finds a collision-free drop position near `target` on another sheet.
///
/// Each pass walks the obstacles in order; for every one still overlapping
/// the candidate, the smallest of the four single-axis pushes that clears it
/// is applied (ties resolve right, left, down, up) and the result re-clamped.
/// Returns `None` when collisions remain after `max_passes`.
pub fn resolve_push_placement(
    target: Point,
    moving: &Rect,
    kerf: f64,
    others: Obstacles<'_>,
    stock: &Stock,
    max_passes: u32,
) -> Option<Point> {
    let mut candidate = clamp_to_stock(target, moving, stock);

    for pass in 0..max_passes {
        if !has_collision(
            candidate.x,
            candidate.y,
            moving.width,
            moving.height,
            others,
            kerf,
        ) {
            return Some(candidate);
        }

        for obstacle in others.iter() {
            let bounds = Bounds::from_origin(candidate.x, candidate.y, moving);
            if !bounds.intersects_with_margin(&obstacle.bounds(), kerf) {
                continue;
            }

            // Each push is the overlap on that side plus the kerf.
            let ob = obstacle.bounds();
            let pushes = [
                (Push::Right, ob.max_x + kerf - bounds.min_x),
                (Push::Left, bounds.max_x + kerf - ob.min_x),
                (Push::Down, ob.max_y + kerf - bounds.min_y),
                (Push::Up, bounds.max_y + kerf - ob.min_y),
            ];

            let mut best = pushes[0];
            for push in &pushes[1..] {
                if push.1 < best.1 {
                    best = *push;
                }
            }

            candidate = match best.0 {
                Push::Right => Point::new(candidate.x + best.1, candidate.y),
                Push::Left => Point::new(candidate.x - best.1, candidate.y),
                Push::Down => Point::new(candidate.x, candidate.y + best.1),
                Push::Up => Point::new(candidate.x, candidate.y - best.1),
            };
            candidate = clamp_to_stock(candidate, moving, stock);
            tracing::trace!(pass, push = ?best.0, x = candidate.x, y = candidate.y, "push");
        }
    }

    if has_collision(
        candidate.x,
        candidate.y,
        moving.width,
        moving.height,
        others,
        kerf,
    ) {
        None
    } else {
        Some(candidate)
    }
}
