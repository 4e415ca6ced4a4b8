//! Render-ready view of a layout.
//!
//! Turns a [`Layout`] plus its [`PieceLookup`] into the text and colors a
//! renderer needs: one heading per sheet, one entry per placement, and the
//! job summary line. Drag feedback is layered on by the caller.

use crate::waste;
use cutlayout_core::{Layout, PieceLookup, Point, Rect};

/// Default per-sheet heading. `{number}` is 1-based, `{waste}` a percentage.
pub const DEFAULT_HEADING_TEMPLATE: &str = "Sheet {number} — Waste: {waste}%";
/// Default summary line. `{count}` is the sheet count.
pub const DEFAULT_SUMMARY_TEMPLATE: &str = "{count} sheet(s) — Overall waste: {waste}%";

/// Presentation settings
#[derive(Debug, Clone, PartialEq)]
pub struct ViewOptions {
    pub heading_template: String,
    pub summary_template: String,
    /// Decimal places for waste percentages.
    pub decimals: usize,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            heading_template: DEFAULT_HEADING_TEMPLATE.to_string(),
            summary_template: DEFAULT_SUMMARY_TEMPLATE.to_string(),
            decimals: 1,
        }
    }
}

/// One placement as drawn
#[derive(Debug, Clone, PartialEq)]
pub struct PieceView {
    pub index: usize,
    pub position: Point,
    pub rect: Rect,
    pub color: &'static str,
    pub label: Option<String>,
    /// `"{w}×{h}"`, suffixed with `" R"` for rotated pieces.
    pub dimensions: String,
}

/// One sheet as drawn
#[derive(Debug, Clone, PartialEq)]
pub struct SheetView {
    pub index: usize,
    pub heading: String,
    pub waste_percent: f64,
    pub pieces: Vec<PieceView>,
}

/// A whole layout as drawn
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutView {
    pub sheets: Vec<SheetView>,
    pub summary: String,
}

impl LayoutView {
    pub fn build(layout: &Layout, lookup: &PieceLookup, options: &ViewOptions) -> Self {
        let sheets = layout
            .sheets
            .iter()
            .enumerate()
            .map(|(i, sheet)| {
                let waste_percent = waste::sheet_waste_percent(sheet, &layout.stock);
                let heading = options
                    .heading_template
                    .replace("{number}", &(i + 1).to_string())
                    .replace("{waste}", &format_fixed(waste_percent, options.decimals));
                let pieces = sheet
                    .placements
                    .iter()
                    .enumerate()
                    .map(|(index, p)| PieceView {
                        index,
                        position: p.position(),
                        rect: p.rect,
                        color: lookup.color(&p.piece_key),
                        label: lookup.label(&p.piece_key).map(str::to_string),
                        dimensions: dimension_text(&p.rect, p.rotated),
                    })
                    .collect();
                SheetView {
                    index: i,
                    heading,
                    waste_percent,
                    pieces,
                }
            })
            .collect();

        let summary = options
            .summary_template
            .replace("{count}", &layout.sheet_count.to_string())
            .replace(
                "{waste}",
                &format_fixed(layout.waste_percent, options.decimals),
            );

        Self { sheets, summary }
    }
}

fn format_fixed(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}")
}

fn format_dimension(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

fn dimension_text(rect: &Rect, rotated: bool) -> String {
    let mut text = format!(
        "{}×{}",
        format_dimension(rect.width),
        format_dimension(rect.height)
    );
    if rotated {
        text.push_str(" R");
    }
    text
}
