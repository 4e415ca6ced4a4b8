//! Wire shape of a layout as produced by the optimizer and stored as an
//! edited result.
//!
//! The payload is deliberately permissive: derived fields may be absent,
//! `stock`/`rect` accept `length`/`width` aliases, piece dimensions may arrive
//! as numeric strings, and unknown fields are carried through untouched so a
//! saved layout keeps everything the optimizer emitted.

use super::geometry::{Rect, Stock};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Piece definition as submitted to the optimizer
///
/// Only used for label lookup; geometry always comes from placements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieceSpec {
    #[serde(alias = "l", deserialize_with = "lenient_f64")]
    pub length: f64,
    #[serde(alias = "w", deserialize_with = "lenient_f64")]
    pub width: f64,
    #[serde(default = "default_quantity", deserialize_with = "lenient_u32")]
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_quantity() -> u32 {
    1
}

/// One placed piece on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementPayload {
    pub x: f64,
    pub y: f64,
    pub rect: Rect,
    #[serde(default)]
    pub rotated: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One sheet on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetPayload {
    #[serde(default)]
    pub placements: Vec<PlacementPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waste_area: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A whole job layout on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutPayload {
    pub stock: Stock,
    #[serde(default)]
    pub kerf: f64,
    #[serde(default)]
    pub pieces: Vec<PieceSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheets: Option<Vec<SheetPayload>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waste_percent: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LayoutPayload {
    /// Parses a payload from JSON text.
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Parses a payload from an already-decoded JSON value.
    pub fn from_json_value(value: Value) -> serde_json::Result<Self> {
        serde_json::from_value(value)
    }

    pub fn to_json_string_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

impl NumberOrString {
    fn to_f64(&self) -> f64 {
        match self {
            NumberOrString::Number(n) => *n,
            NumberOrString::Text(s) => s.trim().parse().unwrap_or(0.0),
        }
    }
}

// Unparseable text reads as 0 rather than failing the whole payload.
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(NumberOrString::deserialize(deserializer)?.to_f64())
}

fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = NumberOrString::deserialize(deserializer)?.to_f64();
    if value.is_finite() && value >= 0.0 {
        Ok(value.min(u32::MAX as f64) as u32)
    } else {
        Ok(0)
    }
}
