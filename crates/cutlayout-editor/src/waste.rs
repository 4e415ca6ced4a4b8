//! Waste recalculation.
//!
//! Waste is always derived from placements; these functions must run after
//! every committed change to placement membership or sheet count.

use cutlayout_core::{Layout, Sheet, Stock};

/// Recomputes `sheet.waste_area` as stock area minus placed area.
pub fn recalc_sheet_waste(sheet: &mut Sheet, stock: &Stock) {
    sheet.waste_area = stock.area() - sheet.used_area();
}

/// Recomputes every sheet's waste, then the job-wide figures.
pub fn recalc_all(layout: &mut Layout) {
    let stock = layout.stock;
    for sheet in &mut layout.sheets {
        recalc_sheet_waste(sheet, &stock);
    }
    recalc_global_waste(layout);
}

/// Recomputes `sheet_count` and `waste_percent` from the sheets' waste areas.
///
/// A layout with no sheets reports zero waste.
pub fn recalc_global_waste(layout: &mut Layout) {
    layout.sheet_count = layout.sheets.len();
    let total_area = layout.stock.area() * layout.sheet_count as f64;
    layout.waste_percent = if total_area > 0.0 {
        let waste: f64 = layout.sheets.iter().map(|s| s.waste_area).sum();
        waste / total_area * 100.0
    } else {
        0.0
    };
}

/// Waste of one sheet as a percentage of the stock area.
pub fn sheet_waste_percent(sheet: &Sheet, stock: &Stock) -> f64 {
    if stock.area() > 0.0 {
        sheet.waste_area / stock.area() * 100.0
    } else {
        0.0
    }
}

/// Waste percentage a layout would report if recomputed from scratch.
pub fn expected_waste_percent(layout: &Layout) -> f64 {
    let mut scratch = layout.clone();
    recalc_all(&mut scratch);
    scratch.waste_percent
}
