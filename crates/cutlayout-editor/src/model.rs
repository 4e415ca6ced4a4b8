//! Layout model operations.
//!
//! Loading validates a wire payload into a [`Layout`]; the remaining
//! operations are the primitive mutations the drag controller composes.
//! Only [`transfer_placement`] maintains derived metrics on its own; callers
//! of the primitives are responsible for pruning and waste recalculation.

use crate::audit;
use crate::waste;
use cutlayout_core::{
    Layout, LayoutError, LayoutPayload, Placement, Point, Sheet, Stock,
};
use serde_json::Value;

/// Builds a layout from a payload.
///
/// Fails when `sheets` is missing, the stock is degenerate, the kerf is
/// negative, or a placement has a degenerate footprint. Derived values present
/// in the payload are kept as-is; absent ones are computed.
pub fn load(payload: LayoutPayload) -> Result<Layout, LayoutError> {
    let LayoutPayload {
        stock,
        kerf,
        pieces,
        sheets,
        sheet_count,
        waste_percent,
        extra,
    } = payload;

    let sheets = sheets.ok_or(LayoutError::MissingSheets)?;
    if !stock.is_valid() {
        return Err(LayoutError::InvalidStock {
            width: stock.width,
            height: stock.height,
        });
    }
    if !kerf.is_finite() || kerf < 0.0 {
        return Err(LayoutError::InvalidKerf { kerf });
    }

    let mut needs_global = sheet_count != Some(sheets.len()) || waste_percent.is_none();
    let mut loaded = Vec::with_capacity(sheets.len());
    for (sheet_index, sheet) in sheets.into_iter().enumerate() {
        let mut placements = Vec::with_capacity(sheet.placements.len());
        for (index, placement) in sheet.placements.into_iter().enumerate() {
            if !placement.rect.is_valid() {
                return Err(LayoutError::InvalidPlacement {
                    sheet: sheet_index,
                    index,
                    reason: format!(
                        "footprint {}x{} must be positive",
                        placement.rect.width, placement.rect.height
                    ),
                });
            }
            if !placement.x.is_finite() || !placement.y.is_finite() {
                return Err(LayoutError::InvalidPlacement {
                    sheet: sheet_index,
                    index,
                    reason: "coordinates must be finite".to_string(),
                });
            }
            placements.push(Placement::from(placement));
        }

        let mut s = Sheet {
            placements,
            waste_area: sheet.waste_area.unwrap_or_default(),
            extra: sheet.extra,
        };
        if sheet.waste_area.is_none() {
            waste::recalc_sheet_waste(&mut s, &stock);
        }
        loaded.push(s);
    }

    let mut layout = Layout {
        stock,
        kerf,
        pieces,
        sheet_count: sheet_count.unwrap_or(loaded.len()),
        sheets: loaded,
        waste_percent: waste_percent.unwrap_or_default(),
        extra,
    };

    let pruned = prune_empty_sheets(&mut layout);
    if pruned > 0 {
        tracing::warn!(pruned, "Layout payload contained empty sheets; pruned on load");
        needs_global = true;
    }
    if needs_global {
        waste::recalc_global_waste(&mut layout);
    }

    for violation in audit::audit(&layout) {
        tracing::warn!(%violation, "Loaded layout violates an invariant");
    }

    tracing::debug!(
        sheets = layout.sheet_count,
        placements = layout.placement_count(),
        waste_percent = layout.waste_percent,
        "Layout loaded"
    );
    Ok(layout)
}

/// Parses and loads a layout from JSON text.
pub fn load_json(json: &str) -> Result<Layout, LayoutError> {
    let payload = LayoutPayload::from_json_str(json).map_err(|e| LayoutError::Malformed {
        reason: e.to_string(),
    })?;
    load(payload)
}

/// Loads a layout from a decoded JSON value.
pub fn load_value(value: Value) -> Result<Layout, LayoutError> {
    let payload = LayoutPayload::from_json_value(value).map_err(|e| LayoutError::Malformed {
        reason: e.to_string(),
    })?;
    load(payload)
}

/// Deep copy with no shared state; the basis of a working copy.
pub fn clone_layout(layout: &Layout) -> Layout {
    layout.clone()
}

/// Removes and returns a placement. The sheet is left in place even if empty.
pub fn remove_placement(
    layout: &mut Layout,
    sheet: usize,
    index: usize,
) -> Result<Placement, LayoutError> {
    let s = layout.sheet_mut(sheet)?;
    if index >= s.placements.len() {
        return Err(LayoutError::PlacementOutOfRange {
            sheet,
            index,
            count: s.placements.len(),
        });
    }
    Ok(s.placements.remove(index))
}

/// Appends a placement on top of a sheet's z-order, returning its index.
pub fn append_placement(
    layout: &mut Layout,
    sheet: usize,
    placement: Placement,
) -> Result<usize, LayoutError> {
    let s = layout.sheet_mut(sheet)?;
    s.placements.push(placement);
    Ok(s.placements.len() - 1)
}

/// Moves a placement within its sheet.
pub fn set_position(
    layout: &mut Layout,
    sheet: usize,
    index: usize,
    position: Point,
) -> Result<(), LayoutError> {
    layout.placement_mut(sheet, index)?.set_position(position);
    Ok(())
}

/// Drops sheets with no placements, keeping the remaining order, and returns
/// how many were removed. `sheet_count` follows the new length.
pub fn prune_empty_sheets(layout: &mut Layout) -> usize {
    let before = layout.sheets.len();
    layout.sheets.retain(|s| !s.is_empty());
    let removed = before - layout.sheets.len();
    if removed > 0 {
        layout.sheet_count = layout.sheets.len();
    }
    removed
}

/// Topmost placement on `sheet` whose footprint contains `point`.
pub fn placement_at(layout: &Layout, sheet: usize, point: Point) -> Option<usize> {
    let s = layout.sheets.get(sheet)?;
    s.placements
        .iter()
        .rposition(|p| p.bounds().contains_point(point))
}

/// Where a transferred placement ended up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transfer {
    /// Target sheet index after pruning.
    pub sheet: usize,
    /// Index of the placement on the target sheet.
    pub index: usize,
    pub position: Point,
    /// Whether the source sheet was emptied and removed.
    pub source_pruned: bool,
}

/// Moves a placement to another sheet as one step: remove, append at
/// `position`, prune, recompute waste.
///
/// The work happens on a scratch copy that replaces `layout` only once every
/// step has succeeded, so observers never see a half-applied transfer.
pub fn transfer_placement(
    layout: &mut Layout,
    from_sheet: usize,
    index: usize,
    to_sheet: usize,
    position: Point,
) -> Result<Transfer, LayoutError> {
    layout.sheet(to_sheet)?;
    let mut scratch = layout.clone();

    let mut placement = remove_placement(&mut scratch, from_sheet, index)?;
    placement.set_position(position);
    let new_index = append_placement(&mut scratch, to_sheet, placement)?;

    let stock: Stock = scratch.stock;
    for sheet in [from_sheet, to_sheet] {
        waste::recalc_sheet_waste(scratch.sheet_mut(sheet)?, &stock);
    }

    let source_pruned = prune_empty_sheets(&mut scratch) > 0;
    waste::recalc_global_waste(&mut scratch);

    let sheet = if source_pruned && from_sheet < to_sheet {
        to_sheet - 1
    } else {
        to_sheet
    };

    *layout = scratch;
    Ok(Transfer {
        sheet,
        index: new_index,
        position,
        source_pruned,
    })
}
