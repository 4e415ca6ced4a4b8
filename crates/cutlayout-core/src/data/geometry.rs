//! Planar primitives shared by the model and the collision code.
//!
//! All coordinates are in stock units with the origin at the top-left corner
//! of a sheet, x growing right and y growing down.

use serde::{Deserialize, Serialize};

/// Slack allowed in edge comparisons, in stock units.
///
/// Positions derived from `edge - kerf - width` can land a rounding step past
/// the edge they were computed from; gaps and overhangs smaller than this are
/// treated as exact.
pub const GEOMETRY_EPSILON: f64 = 1e-6;

/// A position on a sheet
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - other`.
    pub fn offset_from(&self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    /// Rounds both coordinates to the nearest whole unit.
    pub fn rounded(&self) -> Point {
        Point::new(self.x.round(), self.y.round())
    }
}

/// As-placed footprint of a piece (already rotated if the piece is rotated)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    #[serde(rename = "w", alias = "length")]
    pub width: f64,
    #[serde(rename = "h", alias = "width")]
    pub height: f64,
}

impl Rect {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Both sides finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Stock panel dimensions, shared by every sheet of a job
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stock {
    #[serde(rename = "w", alias = "length")]
    pub width: f64,
    #[serde(rename = "h", alias = "width")]
    pub height: f64,
}

impl Stock {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn is_valid(&self) -> bool {
        self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }

    /// Whether a footprint placed at `(x, y)` lies entirely on the stock.
    pub fn contains(&self, x: f64, y: f64, rect: &Rect) -> bool {
        x >= -GEOMETRY_EPSILON
            && y >= -GEOMETRY_EPSILON
            && x + rect.width <= self.width + GEOMETRY_EPSILON
            && y + rect.height <= self.height + GEOMETRY_EPSILON
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Bounds of a footprint placed at `(x, y)`.
    pub fn from_origin(x: f64, y: f64, rect: &Rect) -> Self {
        Self::new(x, y, x + rect.width, y + rect.height)
    }

    /// Inclusive point containment, matching pointer hit-testing on edges.
    pub fn contains_point(&self, point: Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    /// Strict intersection after growing `self` by `margin` on its far edges.
    ///
    /// Boxes separated by exactly `margin`, give or take
    /// [`GEOMETRY_EPSILON`], do not intersect.
    pub fn intersects_with_margin(&self, other: &Bounds, margin: f64) -> bool {
        self.min_x + GEOMETRY_EPSILON < other.max_x + margin
            && self.max_x + margin > other.min_x + GEOMETRY_EPSILON
            && self.min_y + GEOMETRY_EPSILON < other.max_y + margin
            && self.max_y + margin > other.min_y + GEOMETRY_EPSILON
    }
}
