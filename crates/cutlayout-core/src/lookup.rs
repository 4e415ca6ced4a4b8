//! Color and label lookup for piece types.
//!
//! Built once per layout load and handed to the renderer read-only, so every
//! view of the same layout agrees on which color a piece type gets.

use crate::data::{Layout, PieceSpec};
use std::collections::HashMap;

/// Fill colors assigned to piece types in first-seen order.
pub const PIECE_PALETTE: [&str; 10] = [
    "#7DD3FC", "#6EE7B7", "#FDBA74", "#C4B5FD", "#FCA5A5", "#5EEAD4", "#FDE047", "#F9A8D4",
    "#A5B4FC", "#BEF264",
];

/// Color used for a key that was not seen when the table was built.
pub const FALLBACK_COLOR: &str = "#a0aec0";

/// Rotation-invariant key for a footprint: `"{short}×{long}"`.
pub fn piece_key(width: f64, height: f64) -> String {
    format!("{}×{}", width.min(height), width.max(height))
}

/// Read-only piece-type lookup table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PieceLookup {
    colors: HashMap<String, &'static str>,
    labels: HashMap<String, String>,
}

impl PieceLookup {
    /// Builds the table from a layout's placements and piece list.
    pub fn build(layout: &Layout) -> Self {
        let mut colors = HashMap::new();
        for placement in layout.sheets.iter().flat_map(|s| s.placements.iter()) {
            let next = colors.len();
            colors
                .entry(placement.piece_key.clone())
                .or_insert(PIECE_PALETTE[next % PIECE_PALETTE.len()]);
        }

        Self {
            colors,
            labels: Self::labels_for(&layout.pieces),
        }
    }

    fn labels_for(pieces: &[PieceSpec]) -> HashMap<String, String> {
        let mut labels = HashMap::new();
        for piece in pieces {
            let Some(label) = piece.label.as_deref().filter(|l| !l.is_empty()) else {
                continue;
            };
            labels
                .entry(piece_key(piece.length, piece.width))
                .or_insert_with(|| label.to_string());
        }
        labels
    }

    pub fn color(&self, key: &str) -> &'static str {
        self.colors.get(key).copied().unwrap_or(FALLBACK_COLOR)
    }

    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels.get(key).map(String::as_str)
    }

    /// Number of distinct piece types seen on the sheets.
    pub fn piece_types(&self) -> usize {
        self.colors.len()
    }
}
