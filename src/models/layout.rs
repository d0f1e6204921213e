//! Seating-layout wire format.
//!
//! Two historical shapes of the persisted `config` string are in circulation:
//! a plain JSON array of rectangular sections (legacy) and the advanced grid
//! document `{strategy:"advanced", tiers, grid}`. Both must be read and
//! written bit-compatibly, including the abbreviated `t`/`g` cell keys that
//! existing documents use. [`LayoutConfig::parse`] is the single place the
//! shape is decided; nothing else re-sniffs the JSON.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::error::{Error, Result};

/// Discriminant value marking the advanced grid shape.
pub const ADVANCED_STRATEGY: &str = "advanced";

/// A named, priced, colored seat category in the advanced layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tier {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub color: String,
}

/// One cell of the advanced grid as persisted.
///
/// `t` references a tier id, `g = 1` marks a non-seat gap (aisle). Older
/// documents occasionally spell these `tierId` and `type:"gap"`; decoding
/// tolerates both, encoding always produces the short keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    #[serde(default, alias = "tierId", skip_serializing_if = "Option::is_none")]
    pub t: Option<String>,
    #[serde(default)]
    pub g: u8,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl GridCell {
    pub fn seat(tier_id: impl Into<String>) -> Self {
        GridCell { t: Some(tier_id.into()), g: 0, kind: None }
    }

    /// Gap cells keep their last tier reference; consumers ignore it.
    pub fn gap(tier_id: impl Into<String>) -> Self {
        GridCell { t: Some(tier_id.into()), g: 1, kind: None }
    }

    pub fn is_gap(&self) -> bool {
        self.g == 1 || self.kind.as_deref() == Some("gap")
    }
}

/// The advanced grid document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvancedLayout {
    pub strategy: String,
    pub tiers: Vec<Tier>,
    pub grid: Vec<Vec<GridCell>>,
}

/// One rectangular block of the legacy array shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacySection {
    pub name: String,
    #[serde(default)]
    pub rows: u32,
    #[serde(default)]
    pub cols: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(
        rename = "priceMultiplier",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub price_multiplier: Option<f64>,
}

/// Tagged union over the two persisted config shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutConfig {
    Legacy(Vec<LegacySection>),
    Advanced(AdvancedLayout),
}

impl LayoutConfig {
    /// Decode a persisted config string. This is the only deserialization
    /// boundary for layout documents; the shape is decided exhaustively here.
    pub fn parse(raw: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| Error::MalformedLayout(e.to_string()))?;

        match value {
            Value::Array(_) => {
                let sections: Vec<LegacySection> = serde_json::from_value(value)
                    .map_err(|e| Error::MalformedLayout(e.to_string()))?;
                Ok(LayoutConfig::Legacy(sections))
            }
            Value::Object(ref obj)
                if obj.get("strategy").and_then(Value::as_str) == Some(ADVANCED_STRATEGY) =>
            {
                let layout: AdvancedLayout = serde_json::from_value(value)
                    .map_err(|e| Error::MalformedLayout(e.to_string()))?;
                Ok(LayoutConfig::Advanced(layout))
            }
            Value::Object(_) => Err(Error::MalformedLayout(
                "object config without an \"advanced\" strategy".to_string(),
            )),
            _ => Err(Error::MalformedLayout(
                "config must be a JSON array or object".to_string(),
            )),
        }
    }

    /// Encode back to the exact persisted representation.
    pub fn to_wire(&self) -> Result<String> {
        let raw = match self {
            LayoutConfig::Legacy(sections) => serde_json::to_string(sections)?,
            LayoutConfig::Advanced(layout) => serde_json::to_string(layout)?,
        };
        Ok(raw)
    }
}

/// A persisted layout record as returned by `GET /seating-layouts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredLayout {
    pub id: i64,
    pub name: String,
    pub total_rows: u32,
    pub total_cols: u32,
    /// Stringified [`LayoutConfig`].
    pub config: String,
}

/// Payload for `POST /seating-layouts`.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewLayout {
    #[validate(length(min = 1, message = "layout name is required"))]
    pub name: String,
    #[validate(range(min = 1, max = 50))]
    pub total_rows: u32,
    #[validate(range(min = 1, max = 50))]
    pub total_cols: u32,
    pub config: String,
}
