//! Layout invariant audit.
//!
//! Reports every place a layout breaks the bounds, non-overlap, pruning, or
//! derived-metric invariants. Loading logs the findings; tests use the audit
//! to assert that no reachable edit state is invalid.

use crate::collision::overlaps;
use crate::waste;
use cutlayout_core::Layout;
use std::fmt;

/// Recorded waste percentages within this many points of the recomputed
/// value are accepted, since optimizers commonly round the figure.
pub const WASTE_PERCENT_TOLERANCE: f64 = 0.05;

const AREA_TOLERANCE: f64 = 1e-6;

/// One invariant violation
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    /// Placement extends past the stock edge
    OutOfBounds { sheet: usize, index: usize },
    /// Two placements overlap once expanded by the kerf
    Overlap { sheet: usize, a: usize, b: usize },
    /// Sheet with no placements
    EmptySheet { sheet: usize },
    /// Sheet waste does not match its placements
    StaleSheetWaste {
        sheet: usize,
        recorded: f64,
        expected: f64,
    },
    /// `sheet_count` does not match the number of sheets
    StaleSheetCount { recorded: usize, actual: usize },
    /// Job-wide waste does not match the sheets
    StaleWastePercent { recorded: f64, expected: f64 },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::OutOfBounds { sheet, index } => {
                write!(f, "sheet {sheet}: placement {index} extends past the stock")
            }
            Violation::Overlap { sheet, a, b } => {
                write!(f, "sheet {sheet}: placements {a} and {b} overlap")
            }
            Violation::EmptySheet { sheet } => write!(f, "sheet {sheet} has no placements"),
            Violation::StaleSheetWaste {
                sheet,
                recorded,
                expected,
            } => write!(
                f,
                "sheet {sheet}: waste area {recorded} should be {expected}"
            ),
            Violation::StaleSheetCount { recorded, actual } => {
                write!(f, "sheet_count {recorded} but {actual} sheets")
            }
            Violation::StaleWastePercent { recorded, expected } => {
                write!(f, "waste_percent {recorded} should be {expected}")
            }
        }
    }
}

/// Collects every invariant violation in `layout`.
pub fn audit(layout: &Layout) -> Vec<Violation> {
    let mut violations = Vec::new();
    let stock = layout.stock;

    for (sheet_index, sheet) in layout.sheets.iter().enumerate() {
        if sheet.is_empty() {
            violations.push(Violation::EmptySheet { sheet: sheet_index });
        }

        for (i, placement) in sheet.placements.iter().enumerate() {
            if !stock.contains(placement.x, placement.y, &placement.rect) {
                violations.push(Violation::OutOfBounds {
                    sheet: sheet_index,
                    index: i,
                });
            }
            for (j, other) in sheet.placements.iter().enumerate().skip(i + 1) {
                if overlaps(placement, other, layout.kerf) {
                    violations.push(Violation::Overlap {
                        sheet: sheet_index,
                        a: i,
                        b: j,
                    });
                }
            }
        }

        let expected = stock.area() - sheet.used_area();
        if (sheet.waste_area - expected).abs() > AREA_TOLERANCE * stock.area().max(1.0) {
            violations.push(Violation::StaleSheetWaste {
                sheet: sheet_index,
                recorded: sheet.waste_area,
                expected,
            });
        }
    }

    if layout.sheet_count != layout.sheets.len() {
        violations.push(Violation::StaleSheetCount {
            recorded: layout.sheet_count,
            actual: layout.sheets.len(),
        });
    }

    let expected = waste::expected_waste_percent(layout);
    if (layout.waste_percent - expected).abs() > WASTE_PERCENT_TOLERANCE {
        violations.push(Violation::StaleWastePercent {
            recorded: layout.waste_percent,
            expected,
        });
    }

    violations
}

/// Whether only geometric invariants hold (bounds, overlap, no empty sheets).
pub fn is_geometrically_valid(layout: &Layout) -> bool {
    audit(layout).iter().all(|v| {
        matches!(
            v,
            Violation::StaleSheetWaste { .. }
                | Violation::StaleSheetCount { .. }
                | Violation::StaleWastePercent { .. }
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cutlayout_core::{Placement, Rect, Sheet, Stock};

    fn layout_with(placements: Vec<Placement>, kerf: f64) -> Layout {
        let mut layout = Layout::new(Stock::new(1000.0, 500.0), kerf, vec![Sheet::new(placements)]);
        waste::recalc_all(&mut layout);
        layout
    }

    #[test]
    fn test_clean_layout_has_no_violations() {
        let layout = layout_with(
            vec![
                Placement::new(Rect::new(200.0, 100.0), 0.0, 0.0, false),
                Placement::new(Rect::new(300.0, 100.0), 203.0, 0.0, false),
            ],
            3.0,
        );
        assert!(audit(&layout).is_empty());
        assert!(is_geometrically_valid(&layout));
    }

    #[test]
    fn test_detects_kerf_overlap_and_bounds() {
        let layout = layout_with(
            vec![
                Placement::new(Rect::new(200.0, 100.0), 0.0, 0.0, false),
                Placement::new(Rect::new(300.0, 100.0), 202.0, 0.0, false),
                Placement::new(Rect::new(300.0, 100.0), 800.0, 450.0, false),
            ],
            3.0,
        );
        let violations = audit(&layout);
        assert!(violations.contains(&Violation::Overlap { sheet: 0, a: 0, b: 1 }));
        assert!(violations.contains(&Violation::OutOfBounds { sheet: 0, index: 2 }));
        assert!(!is_geometrically_valid(&layout));
    }

    #[test]
    fn test_detects_stale_metrics() {
        let mut layout = layout_with(
            vec![Placement::new(Rect::new(200.0, 100.0), 0.0, 0.0, false)],
            0.0,
        );
        layout.sheet_count = 3;
        layout.waste_percent = 10.0;
        let violations = audit(&layout);
        assert!(violations.contains(&Violation::StaleSheetCount {
            recorded: 3,
            actual: 1
        }));
        assert!(violations
            .iter()
            .any(|v| matches!(v, Violation::StaleWastePercent { .. })));
        assert!(is_geometrically_valid(&layout));
    }
}
