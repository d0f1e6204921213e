//! Seat-availability reconciliation.
//!
//! Turns a fetched event (legacy rectangular sections, or the advanced grid
//! embedded in the first section's `layoutConfig`) into a renderable plan of
//! seats keyed by `"{section}-{row}-{col}"` identifiers — the same strings
//! the booked-seats endpoint returns, which is the sole correlation between
//! layout cells and booking records.

pub mod selection;

use std::collections::HashMap;

use tracing::warn;

use crate::models::event::Event;
use crate::models::layout::{AdvancedLayout, LayoutConfig, Tier};

pub use selection::{Selection, Toggle, MAX_SELECTED_SEATS};

/// Seat identifier shared with the booking records, 1-indexed.
pub fn seat_id(section: &str, row: u32, col: u32) -> String {
    format!("{section}-{row}-{col}")
}

/// Display label for a 0-indexed row: A, B, C...
pub fn row_label(index: usize) -> char {
    (b'A' + (index % 26) as u8) as char
}

/// A bookable cell with everything a ticket request needs.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanSeat {
    pub id: String,
    /// Persisted section id; 0 when the tier resolved to no stored section.
    pub section_id: i64,
    pub section_name: String,
    pub price: f64,
    pub row: u32,
    pub col: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlanCell {
    /// Aisle; never clickable regardless of any stale tier reference.
    Gap,
    Seat(PlanSeat),
}

/// One rectangular legacy section.
#[derive(Debug, Clone)]
pub struct SectionBlock {
    pub section_id: i64,
    pub name: String,
    pub price: f64,
    pub rows: Vec<Vec<PlanSeat>>,
}

#[derive(Debug, Clone)]
pub enum SeatingPlan {
    /// One block per persisted section.
    Legacy(Vec<SectionBlock>),
    /// A single unified grid spanning all tiers.
    Advanced { tiers: Vec<Tier>, rows: Vec<Vec<PlanCell>> },
}

/// Resolution of a tier reference against the persisted sections, computed
/// once per plan rather than per cell.
struct ResolvedTier {
    name: String,
    price: f64,
    section_id: i64,
}

/// An unknown or absent tier id falls back to the first tier. A tier whose
/// name matches no persisted section falls back to its own nominal price
/// with a synthetic section id of 0; such a seat is selectable client-side
/// but the server will reject the ticket.
fn resolve_tier(event: &Event, layout: &AdvancedLayout, tier_ref: Option<&str>) -> ResolvedTier {
    let tier = tier_ref
        .and_then(|id| layout.tiers.iter().find(|t| t.id == id))
        .unwrap_or(&layout.tiers[0]);
    match event.sections.iter().find(|s| s.name == tier.name) {
        Some(section) => ResolvedTier {
            name: tier.name.clone(),
            price: section.price,
            section_id: section.id,
        },
        None => {
            warn!(tier = %tier.name, "tier has no matching persisted section");
            ResolvedTier { name: tier.name.clone(), price: tier.price, section_id: 0 }
        }
    }
}

impl SeatingPlan {
    /// Build the plan for an event. This is the single detection boundary:
    /// the event is advanced iff its first section carries a config that
    /// parses to the advanced shape. A malformed config is logged and
    /// degrades to the legacy rendering instead of failing the page.
    pub fn from_event(event: &Event) -> SeatingPlan {
        let advanced = event
            .sections
            .first()
            .and_then(|section| section.layout_config.as_deref())
            .and_then(|raw| match LayoutConfig::parse(raw) {
                Ok(LayoutConfig::Advanced(layout)) => Some(layout),
                Ok(LayoutConfig::Legacy(_)) => None,
                Err(e) => {
                    warn!(event_id = event.id, "unusable layout config: {e}");
                    None
                }
            });

        match advanced {
            Some(layout) if !layout.tiers.is_empty() => Self::build_advanced(event, &layout),
            Some(_) => {
                warn!(event_id = event.id, "advanced config has no tiers");
                Self::build_legacy(event)
            }
            None => Self::build_legacy(event),
        }
    }

    fn build_legacy(event: &Event) -> SeatingPlan {
        let blocks = event
            .sections
            .iter()
            .map(|section| {
                let rows = (1..=section.rows)
                    .map(|r| {
                        (1..=section.cols)
                            .map(|c| PlanSeat {
                                id: seat_id(&section.name, r, c),
                                section_id: section.id,
                                section_name: section.name.clone(),
                                price: section.price,
                                row: r,
                                col: c,
                            })
                            .collect()
                    })
                    .collect();
                SectionBlock {
                    section_id: section.id,
                    name: section.name.clone(),
                    price: section.price,
                    rows,
                }
            })
            .collect();
        SeatingPlan::Legacy(blocks)
    }

    fn build_advanced(event: &Event, layout: &AdvancedLayout) -> SeatingPlan {
        // Tier → section cross-reference is by name, established at event
        // creation. Resolve each distinct tier reference exactly once.
        let mut resolved: HashMap<String, ResolvedTier> = HashMap::new();

        let mut rows = Vec::with_capacity(layout.grid.len());
        for (r, grid_row) in layout.grid.iter().enumerate() {
            let mut cells = Vec::with_capacity(grid_row.len());
            for (c, cell) in grid_row.iter().enumerate() {
                if cell.is_gap() {
                    cells.push(PlanCell::Gap);
                    continue;
                }
                let key = cell.t.clone().unwrap_or_default();
                let info = resolved
                    .entry(key)
                    .or_insert_with(|| resolve_tier(event, layout, cell.t.as_deref()));
                let (row_n, col_n) = (r as u32 + 1, c as u32 + 1);
                cells.push(PlanCell::Seat(PlanSeat {
                    id: seat_id(&info.name, row_n, col_n),
                    section_id: info.section_id,
                    section_name: info.name.clone(),
                    price: info.price,
                    row: row_n,
                    col: col_n,
                }));
            }
            rows.push(cells);
        }

        SeatingPlan::Advanced { tiers: layout.tiers.clone(), rows }
    }

    /// All bookable seats in render order.
    pub fn seats(&self) -> Vec<&PlanSeat> {
        match self {
            SeatingPlan::Legacy(blocks) => blocks
                .iter()
                .flat_map(|block| block.rows.iter().flatten())
                .collect(),
            SeatingPlan::Advanced { rows, .. } => rows
                .iter()
                .flatten()
                .filter_map(|cell| match cell {
                    PlanCell::Seat(seat) => Some(seat),
                    PlanCell::Gap => None,
                })
                .collect(),
        }
    }

    pub fn find_seat(&self, id: &str) -> Option<&PlanSeat> {
        self.seats().into_iter().find(|seat| seat.id == id)
    }

    /// "No seating layout available": nothing to click on.
    pub fn is_empty(&self) -> bool {
        self.seats().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::EventSection;

    pub(crate) fn event_with_sections(sections: Vec<EventSection>) -> Event {
        Event {
            id: 1,
            title: "Test Event".into(),
            description: None,
            venue: None,
            category: None,
            price: None,
            image_url: None,
            trailer_url: None,
            date: Some("2026-09-01T19:30:00".into()),
            start_date: None,
            end_date: None,
            show_times: vec![],
            duration: None,
            imdb_rating: None,
            movie_mode: None,
            censor_rating: None,
            cast: vec![],
            group_id: None,
            sections,
        }
    }

    fn legacy_section(id: i64, name: &str, rows: u32, cols: u32, price: f64) -> EventSection {
        EventSection { id, name: name.into(), rows, cols, price, layout_config: None }
    }

    fn advanced_event(config: &str) -> Event {
        event_with_sections(vec![EventSection {
            id: 11,
            name: "Standard".into(),
            rows: 0,
            cols: 0,
            price: 120.0,
            layout_config: Some(config.to_string()),
        }])
    }

    const TWO_BY_TWO: &str = r##"{
        "strategy": "advanced",
        "tiers": [{"id":"t1","name":"Standard","price":100,"color":"#34D399"}],
        "grid": [
            [{"t":"t1","g":0},{"t":"t1","g":0}],
            [{"t":"t1","g":0},{"t":"t1","g":0}]
        ]
    }"##;

    #[test]
    fn legacy_sections_produce_one_indexed_identifiers() {
        let event = event_with_sections(vec![legacy_section(5, "Balcony", 2, 3, 80.0)]);
        let plan = SeatingPlan::from_event(&event);

        let ids: Vec<String> = plan.seats().iter().map(|s| s.id.clone()).collect();
        assert_eq!(
            ids,
            vec![
                "Balcony-1-1", "Balcony-1-2", "Balcony-1-3",
                "Balcony-2-1", "Balcony-2-2", "Balcony-2-3",
            ]
        );
        let seat = plan.find_seat("Balcony-2-3").unwrap();
        assert_eq!(seat.section_id, 5);
        assert_eq!(seat.price, 80.0);
    }

    #[test]
    fn advanced_grid_matches_expected_scenario() {
        // 2×2 all-Standard grid against a persisted "Standard" section.
        let plan = SeatingPlan::from_event(&advanced_event(TWO_BY_TWO));

        let ids: Vec<String> = plan.seats().iter().map(|s| s.id.clone()).collect();
        assert_eq!(
            ids,
            vec!["Standard-1-1", "Standard-1-2", "Standard-2-1", "Standard-2-2"]
        );
        // Section resolved by name: persisted price and id win over the tier.
        let seat = plan.find_seat("Standard-1-1").unwrap();
        assert_eq!(seat.section_id, 11);
        assert_eq!(seat.price, 120.0);
    }

    #[test]
    fn gap_cells_never_become_seats() {
        let config = r##"{
            "strategy": "advanced",
            "tiers": [{"id":"t1","name":"Standard","price":100,"color":"#34D399"}],
            "grid": [[{"t":"t1","g":0},{"t":"t1","g":1},{"t":"t1","g":0}]]
        }"##;
        let plan = SeatingPlan::from_event(&advanced_event(config));

        assert_eq!(plan.seats().len(), 2);
        let SeatingPlan::Advanced { rows, .. } = &plan else { panic!() };
        assert_eq!(rows[0][1], PlanCell::Gap);
        // The gap does not shift identifiers of later columns.
        assert!(plan.find_seat("Standard-1-3").is_some());
        assert!(plan.find_seat("Standard-1-2").is_none());
    }

    #[test]
    fn unknown_tier_reference_falls_back_to_first_tier() {
        let config = r##"{
            "strategy": "advanced",
            "tiers": [{"id":"t1","name":"Standard","price":100,"color":"#34D399"}],
            "grid": [[{"t":"ghost","g":0}]]
        }"##;
        let plan = SeatingPlan::from_event(&advanced_event(config));
        let seat = plan.find_seat("Standard-1-1").unwrap();
        assert_eq!(seat.section_name, "Standard");
        assert_eq!(seat.section_id, 11);
    }

    #[test]
    fn tier_without_persisted_section_uses_nominal_price_and_id_zero() {
        let config = r##"{
            "strategy": "advanced",
            "tiers": [
                {"id":"t1","name":"Standard","price":100,"color":"#34D399"},
                {"id":"t2","name":"Orphan","price":999,"color":"#FCD34D"}
            ],
            "grid": [[{"t":"t2","g":0}]]
        }"##;
        let plan = SeatingPlan::from_event(&advanced_event(config));
        let seat = plan.find_seat("Orphan-1-1").unwrap();
        assert_eq!(seat.section_id, 0);
        assert_eq!(seat.price, 999.0);
    }

    #[test]
    fn malformed_config_degrades_to_legacy() {
        let mut event = advanced_event("{broken json");
        // Give the section real dimensions so the legacy fallback renders.
        event.sections[0].rows = 1;
        event.sections[0].cols = 2;

        let plan = SeatingPlan::from_event(&event);
        assert!(matches!(plan, SeatingPlan::Legacy(_)));
        assert_eq!(plan.seats().len(), 2);
    }

    #[test]
    fn event_without_sections_has_no_layout() {
        let plan = SeatingPlan::from_event(&event_with_sections(vec![]));
        assert!(plan.is_empty());
    }

    #[test]
    fn legacy_config_string_in_section_still_renders_legacy_blocks() {
        let mut event = event_with_sections(vec![legacy_section(1, "Stalls", 2, 2, 50.0)]);
        event.sections[0].layout_config =
            Some(r#"[{"name":"Stalls","rows":2,"cols":2}]"#.into());
        let plan = SeatingPlan::from_event(&event);
        assert!(matches!(plan, SeatingPlan::Legacy(_)));
    }

    #[test]
    fn row_labels_follow_the_alphabet() {
        assert_eq!(row_label(0), 'A');
        assert_eq!(row_label(3), 'D');
        assert_eq!(row_label(25), 'Z');
    }
}
