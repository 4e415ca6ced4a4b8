//! In-memory layout model: placements grouped into sheets of one job.

use super::geometry::{Bounds, Point, Rect, Stock};
use super::payload::{LayoutPayload, PieceSpec, PlacementPayload, SheetPayload};
use crate::error::LayoutError;
use crate::lookup::piece_key;
use serde_json::{Map, Value};

/// A piece instance positioned on a sheet
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// As-placed footprint (post-rotation).
    pub rect: Rect,
    pub x: f64,
    pub y: f64,
    pub rotated: bool,
    /// Rotation-invariant key of the originating piece type, used only for
    /// color and label lookup.
    pub piece_key: String,
    /// Optimizer fields this crate does not interpret.
    pub extra: Map<String, Value>,
}

impl Placement {
    /// Creates a placement, deriving its piece key from the footprint.
    pub fn new(rect: Rect, x: f64, y: f64, rotated: bool) -> Self {
        Self {
            piece_key: piece_key(rect.width, rect.height),
            rect,
            x,
            y,
            rotated,
            extra: Map::new(),
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn set_position(&mut self, position: Point) {
        self.x = position.x;
        self.y = position.y;
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_origin(self.x, self.y, &self.rect)
    }

    pub fn area(&self) -> f64 {
        self.rect.area()
    }
}

impl From<PlacementPayload> for Placement {
    fn from(payload: PlacementPayload) -> Self {
        let mut placement = Placement::new(payload.rect, payload.x, payload.y, payload.rotated);
        placement.extra = payload.extra;
        placement
    }
}

impl From<&Placement> for PlacementPayload {
    fn from(placement: &Placement) -> Self {
        Self {
            x: placement.x,
            y: placement.y,
            rect: placement.rect,
            rotated: placement.rotated,
            extra: placement.extra.clone(),
        }
    }
}

/// One stock panel and the pieces cut from it
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sheet {
    /// Placements in render (z) order; later entries draw on top.
    pub placements: Vec<Placement>,
    /// Unused stock area on this sheet.
    pub waste_area: f64,
    pub extra: Map<String, Value>,
}

impl Sheet {
    pub fn new(placements: Vec<Placement>) -> Self {
        Self {
            placements,
            waste_area: 0.0,
            extra: Map::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// Sum of all placed footprint areas.
    pub fn used_area(&self) -> f64 {
        self.placements.iter().map(Placement::area).sum()
    }
}

/// One job's complete cut layout
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub stock: Stock,
    /// Blade-width margin kept between pieces.
    pub kerf: f64,
    pub pieces: Vec<PieceSpec>,
    pub sheets: Vec<Sheet>,
    pub sheet_count: usize,
    /// Job-wide waste at full precision; round only for display.
    pub waste_percent: f64,
    pub extra: Map<String, Value>,
}

impl Layout {
    /// Creates a layout with no derived metrics computed yet.
    pub fn new(stock: Stock, kerf: f64, sheets: Vec<Sheet>) -> Self {
        Self {
            stock,
            kerf,
            pieces: Vec::new(),
            sheet_count: sheets.len(),
            sheets,
            waste_percent: 0.0,
            extra: Map::new(),
        }
    }

    pub fn sheet(&self, sheet: usize) -> Result<&Sheet, LayoutError> {
        let count = self.sheets.len();
        self.sheets
            .get(sheet)
            .ok_or(LayoutError::SheetOutOfRange { sheet, count })
    }

    pub fn sheet_mut(&mut self, sheet: usize) -> Result<&mut Sheet, LayoutError> {
        let count = self.sheets.len();
        self.sheets
            .get_mut(sheet)
            .ok_or(LayoutError::SheetOutOfRange { sheet, count })
    }

    pub fn placement(&self, sheet: usize, index: usize) -> Result<&Placement, LayoutError> {
        let s = self.sheet(sheet)?;
        s.placements
            .get(index)
            .ok_or(LayoutError::PlacementOutOfRange {
                sheet,
                index,
                count: s.placements.len(),
            })
    }

    pub fn placement_mut(
        &mut self,
        sheet: usize,
        index: usize,
    ) -> Result<&mut Placement, LayoutError> {
        let s = self.sheet_mut(sheet)?;
        let count = s.placements.len();
        s.placements
            .get_mut(index)
            .ok_or(LayoutError::PlacementOutOfRange {
                sheet,
                index,
                count,
            })
    }

    /// Total number of placements across all sheets.
    pub fn placement_count(&self) -> usize {
        self.sheets.iter().map(Sheet::len).sum()
    }

    /// Serializes back to the wire shape.
    pub fn to_payload(&self) -> LayoutPayload {
        LayoutPayload {
            stock: self.stock,
            kerf: self.kerf,
            pieces: self.pieces.clone(),
            sheets: Some(
                self.sheets
                    .iter()
                    .map(|sheet| SheetPayload {
                        placements: sheet.placements.iter().map(PlacementPayload::from).collect(),
                        waste_area: Some(sheet.waste_area),
                        extra: sheet.extra.clone(),
                    })
                    .collect(),
            ),
            sheet_count: Some(self.sheet_count),
            waste_percent: Some(self.waste_percent),
            extra: self.extra.clone(),
        }
    }
}
