use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::Result;
use crate::models::layout::LayoutConfig;

/// A priced seating group attached to an event.
///
/// Legacy events carry real `rows`/`cols` per section; events created from an
/// advanced layout store the full grid config on the first section and keep
/// `rows = cols = 0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSection {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub rows: u32,
    #[serde(default)]
    pub cols: u32,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub layout_config: Option<String>,
}

/// An event as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub trailer_url: Option<String>,
    /// Default show instant, ISO-8601 local datetime.
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub show_times: Vec<String>,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub imdb_rating: Option<f64>,
    #[serde(default)]
    pub movie_mode: Option<String>,
    #[serde(default)]
    pub censor_rating: Option<String>,
    #[serde(default)]
    pub cast: Vec<String>,
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub sections: Vec<EventSection>,
}

/// A section as submitted at event-creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionPayload {
    pub name: String,
    pub rows: u32,
    pub cols: u32,
    pub price: f64,
    pub layout_config: Option<String>,
}

/// Payload for `POST /events` and `PUT /events/{id}`.
#[derive(Debug, Clone, Default, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(length(min = 1, message = "Venue is required"))]
    pub venue: String,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,
    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trailer_url: Option<String>,
    pub start_date: String,
    pub end_date: String,
    pub show_times: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, max = 10.0))]
    pub imdb_rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movie_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub censor_rating: Option<String>,
    pub cast: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    pub sections: Vec<SectionPayload>,
}

/// Expand a chosen seating layout into the priced sections of a new event.
///
/// Legacy sections copy their dimensions and scale the base price by the
/// section multiplier. Advanced tiers become dimensionless sections priced at
/// `base × tier.price / 100`, with the full config string stored on the first
/// section only — the booking page finds it there.
pub fn expand_layout_sections(
    config: &LayoutConfig,
    base_price: f64,
) -> Result<Vec<SectionPayload>> {
    match config {
        LayoutConfig::Legacy(sections) => Ok(sections
            .iter()
            .map(|section| SectionPayload {
                name: section.name.clone(),
                rows: section.rows,
                cols: section.cols,
                price: base_price * section.price_multiplier.unwrap_or(1.0),
                layout_config: None,
            })
            .collect()),
        LayoutConfig::Advanced(layout) => {
            let wire = config.to_wire()?;
            Ok(layout
                .tiers
                .iter()
                .enumerate()
                .map(|(index, tier)| SectionPayload {
                    name: tier.name.clone(),
                    rows: 0,
                    cols: 0,
                    price: base_price * (tier.price / 100.0),
                    layout_config: (index == 0).then(|| wire.clone()),
                })
                .collect())
        }
    }
}
