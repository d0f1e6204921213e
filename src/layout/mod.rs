//! Interactive seating-layout editor.
//!
//! Models the authoring grid behind the admin layout designer: tiers are
//! painted onto a rows×cols grid, aisles are erased into gaps, and the result
//! collapses into the advanced wire config (`{strategy, tiers, grid}` with
//! `{t, g}` cells). The editor owns authoring state only; persisted layouts
//! are immutable, so there is no load-and-edit path.

use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::layout::{
    AdvancedLayout, GridCell, LayoutConfig, NewLayout, Tier, ADVANCED_STRATEGY,
};

pub const MAX_GRID_DIM: usize = 50;
pub const DEFAULT_ROWS: usize = 10;
pub const DEFAULT_COLS: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    /// Assign the active tier; forces the cell back to a seat.
    Paint,
    /// Toggle a cell between seat and gap (aisle).
    Erase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Seat,
    Gap,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditorCell {
    pub kind: CellKind,
    pub tier_id: String,
}

#[derive(Debug, Clone)]
pub struct LayoutEditor {
    rows: usize,
    cols: usize,
    tiers: Vec<Tier>,
    active_tier: String,
    tool: Tool,
    grid: Vec<Vec<EditorCell>>,
    drawing: bool,
}

fn default_tiers() -> Vec<Tier> {
    vec![
        Tier { id: "t1".into(), name: "Standard".into(), price: 100.0, color: "#34D399".into() },
        Tier { id: "t2".into(), name: "VIP".into(), price: 250.0, color: "#FCD34D".into() },
    ]
}

fn clamp_dim(dim: usize) -> usize {
    dim.clamp(1, MAX_GRID_DIM)
}

impl Default for LayoutEditor {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS, DEFAULT_COLS)
    }
}

impl LayoutEditor {
    /// Fresh grid; every cell starts as a seat of the first tier.
    pub fn new(rows: usize, cols: usize) -> Self {
        let tiers = default_tiers();
        let active_tier = tiers[0].id.clone();
        let rows = clamp_dim(rows);
        let cols = clamp_dim(cols);
        let grid = vec![
            vec![EditorCell { kind: CellKind::Seat, tier_id: active_tier.clone() }; cols];
            rows
        ];
        LayoutEditor { rows, cols, tiers, active_tier, tool: Tool::Paint, grid, drawing: false }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    pub fn active_tier(&self) -> &str {
        &self.active_tier
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&EditorCell> {
        self.grid.get(row).and_then(|r| r.get(col))
    }

    pub fn seat_count(&self) -> usize {
        self.grid
            .iter()
            .flatten()
            .filter(|cell| cell.kind == CellKind::Seat)
            .count()
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    /// Selecting a tier also switches back to painting.
    pub fn select_tier(&mut self, tier_id: &str) -> Result<()> {
        if !self.tiers.iter().any(|t| t.id == tier_id) {
            return Err(Error::Validation(format!("unknown tier {tier_id}")));
        }
        self.active_tier = tier_id.to_string();
        self.tool = Tool::Paint;
        Ok(())
    }

    /// Apply the active tool to one cell. Out-of-bounds coordinates are
    /// ignored, matching pointer events that leave the canvas.
    pub fn apply(&mut self, row: usize, col: usize) {
        let (tool, active) = (self.tool, self.active_tier.clone());
        let Some(cell) = self.grid.get_mut(row).and_then(|r| r.get_mut(col)) else {
            return;
        };
        match tool {
            Tool::Paint => {
                cell.kind = CellKind::Seat;
                cell.tier_id = active;
            }
            Tool::Erase => {
                cell.kind = match cell.kind {
                    CellKind::Gap => CellKind::Seat,
                    CellKind::Seat => CellKind::Gap,
                };
            }
        }
    }

    // Drag painting: one cell mutation per pointer event, gated by the
    // drawing flag so moves without a pressed button change nothing.

    pub fn pointer_down(&mut self, row: usize, col: usize) {
        self.drawing = true;
        self.apply(row, col);
    }

    pub fn pointer_enter(&mut self, row: usize, col: usize) {
        if self.drawing {
            self.apply(row, col);
        }
    }

    pub fn pointer_up(&mut self) {
        self.drawing = false;
    }

    /// Resize, preserving cells still in bounds; new cells default to a seat
    /// of the first tier.
    pub fn resize(&mut self, rows: usize, cols: usize) {
        let rows = clamp_dim(rows);
        let cols = clamp_dim(cols);
        let first_tier = self.tiers[0].id.clone();

        let mut grid = Vec::with_capacity(rows);
        for r in 0..rows {
            let mut row = Vec::with_capacity(cols);
            for c in 0..cols {
                match self.grid.get(r).and_then(|old| old.get(c)) {
                    Some(cell) => row.push(cell.clone()),
                    None => row.push(EditorCell {
                        kind: CellKind::Seat,
                        tier_id: first_tier.clone(),
                    }),
                }
            }
            grid.push(row);
        }
        self.grid = grid;
        self.rows = rows;
        self.cols = cols;
    }

    /// Discard all authoring state and start over at the given dimensions.
    pub fn reset(&mut self, rows: usize, cols: usize) {
        *self = LayoutEditor::new(rows, cols);
    }

    /// Add a tier with a generated id and make it active. Returns the id.
    pub fn add_tier(&mut self) -> String {
        let id = format!("t-{}", Uuid::new_v4().simple());
        self.tiers.push(Tier {
            id: id.clone(),
            name: "New Tier".into(),
            price: 150.0,
            color: "#A78BFA".into(),
        });
        self.active_tier = id.clone();
        id
    }

    pub fn rename_tier(&mut self, tier_id: &str, name: &str) -> Result<()> {
        self.tier_mut(tier_id)?.name = name.to_string();
        Ok(())
    }

    pub fn set_tier_price(&mut self, tier_id: &str, price: f64) -> Result<()> {
        if price < 0.0 {
            return Err(Error::Validation("Tier price must not be negative".into()));
        }
        self.tier_mut(tier_id)?.price = price;
        Ok(())
    }

    pub fn set_tier_color(&mut self, tier_id: &str, color: &str) -> Result<()> {
        self.tier_mut(tier_id)?.color = color.to_string();
        Ok(())
    }

    /// Remove a tier. The last remaining tier cannot be removed; cells still
    /// referencing a removed tier keep the stale id and fall back to the
    /// first tier when rendered.
    pub fn remove_tier(&mut self, tier_id: &str) -> Result<()> {
        if self.tiers.len() <= 1 {
            return Err(Error::Validation("At least one tier is required".into()));
        }
        let position = self
            .tiers
            .iter()
            .position(|t| t.id == tier_id)
            .ok_or_else(|| Error::Validation(format!("unknown tier {tier_id}")))?;
        self.tiers.remove(position);
        if self.active_tier == tier_id {
            self.active_tier = self.tiers[0].id.clone();
        }
        Ok(())
    }

    fn tier_mut(&mut self, tier_id: &str) -> Result<&mut Tier> {
        self.tiers
            .iter_mut()
            .find(|t| t.id == tier_id)
            .ok_or_else(|| Error::Validation(format!("unknown tier {tier_id}")))
    }

    /// Collapse the authoring grid into the advanced wire document.
    ///
    /// Tier names must be non-empty and unique: the name feeds directly into
    /// seat identifiers at booking time, so duplicates would make seats from
    /// different tiers collide.
    pub fn to_config(&self) -> Result<AdvancedLayout> {
        let mut seen = std::collections::HashSet::new();
        for tier in &self.tiers {
            let name = tier.name.trim();
            if name.is_empty() {
                return Err(Error::Validation("Tier names must not be empty".into()));
            }
            if !seen.insert(name) {
                return Err(Error::Validation(format!(
                    "Duplicate tier name \"{name}\" would produce colliding seat identifiers"
                )));
            }
        }

        let grid = self
            .grid
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| match cell.kind {
                        CellKind::Seat => GridCell::seat(cell.tier_id.clone()),
                        CellKind::Gap => GridCell::gap(cell.tier_id.clone()),
                    })
                    .collect()
            })
            .collect();

        Ok(AdvancedLayout {
            strategy: ADVANCED_STRATEGY.to_string(),
            tiers: self.tiers.clone(),
            grid,
        })
    }

    /// Build the `POST /seating-layouts` payload.
    pub fn save_payload(&self, name: &str) -> Result<NewLayout> {
        if name.trim().is_empty() {
            return Err(Error::Validation("Please enter a layout name".into()));
        }
        let config = LayoutConfig::Advanced(self.to_config()?).to_wire()?;
        Ok(NewLayout {
            name: name.to_string(),
            total_rows: self.rows as u32,
            total_cols: self.cols as u32,
            config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_defaults_to_first_tier_seats() {
        let editor = LayoutEditor::new(3, 4);
        assert_eq!(editor.rows(), 3);
        assert_eq!(editor.cols(), 4);
        assert_eq!(editor.seat_count(), 12);
        let cell = editor.cell(2, 3).unwrap();
        assert_eq!(cell.kind, CellKind::Seat);
        assert_eq!(cell.tier_id, "t1");
    }

    #[test]
    fn dimensions_are_clamped() {
        let editor = LayoutEditor::new(0, 500);
        assert_eq!(editor.rows(), 1);
        assert_eq!(editor.cols(), MAX_GRID_DIM);
    }

    #[test]
    fn paint_assigns_active_tier_and_restores_seats() {
        let mut editor = LayoutEditor::new(2, 2);
        editor.set_tool(Tool::Erase);
        editor.apply(0, 0);
        assert_eq!(editor.cell(0, 0).unwrap().kind, CellKind::Gap);

        editor.select_tier("t2").unwrap();
        assert_eq!(editor.tool(), Tool::Paint);
        editor.apply(0, 0);
        let cell = editor.cell(0, 0).unwrap();
        assert_eq!(cell.kind, CellKind::Seat);
        assert_eq!(cell.tier_id, "t2");
    }

    #[test]
    fn erase_toggles_gap_back_to_seat() {
        let mut editor = LayoutEditor::new(1, 1);
        editor.set_tool(Tool::Erase);
        editor.apply(0, 0);
        editor.apply(0, 0);
        assert_eq!(editor.cell(0, 0).unwrap().kind, CellKind::Seat);
    }

    #[test]
    fn drag_painting_is_gated_by_pointer_state() {
        let mut editor = LayoutEditor::new(1, 3);
        editor.select_tier("t2").unwrap();

        // No button pressed: entering cells paints nothing.
        editor.pointer_enter(0, 0);
        assert_eq!(editor.cell(0, 0).unwrap().tier_id, "t1");

        editor.pointer_down(0, 0);
        editor.pointer_enter(0, 1);
        editor.pointer_up();
        editor.pointer_enter(0, 2);

        assert_eq!(editor.cell(0, 0).unwrap().tier_id, "t2");
        assert_eq!(editor.cell(0, 1).unwrap().tier_id, "t2");
        assert_eq!(editor.cell(0, 2).unwrap().tier_id, "t1");
    }

    #[test]
    fn out_of_bounds_pointer_events_are_ignored() {
        let mut editor = LayoutEditor::new(2, 2);
        editor.pointer_down(5, 9);
        assert_eq!(editor.seat_count(), 4);
    }

    #[test]
    fn resize_preserves_surviving_cells_and_defaults_new_ones() {
        let mut editor = LayoutEditor::new(2, 2);
        editor.set_tool(Tool::Erase);
        editor.apply(0, 1);
        editor.select_tier("t2").unwrap();
        editor.apply(1, 0);

        editor.resize(3, 3);
        assert_eq!(editor.cell(0, 1).unwrap().kind, CellKind::Gap);
        assert_eq!(editor.cell(1, 0).unwrap().tier_id, "t2");
        let fresh = editor.cell(2, 2).unwrap();
        assert_eq!(fresh.kind, CellKind::Seat);
        assert_eq!(fresh.tier_id, "t1");

        // Shrinking drops out-of-bounds cells for good.
        editor.resize(1, 1);
        editor.resize(2, 2);
        assert_eq!(editor.cell(0, 1).unwrap().kind, CellKind::Seat);
    }

    #[test]
    fn last_tier_cannot_be_removed() {
        let mut editor = LayoutEditor::new(1, 1);
        editor.remove_tier("t2").unwrap();
        let err = editor.remove_tier("t1").unwrap_err();
        assert!(err.to_string().contains("At least one tier"));
    }

    #[test]
    fn removing_active_tier_falls_back_to_first() {
        let mut editor = LayoutEditor::new(1, 1);
        editor.select_tier("t2").unwrap();
        editor.remove_tier("t2").unwrap();
        assert_eq!(editor.active_tier(), "t1");
    }

    #[test]
    fn added_tier_becomes_active_with_unique_id() {
        let mut editor = LayoutEditor::new(1, 1);
        let a = editor.add_tier();
        let b = editor.add_tier();
        assert_ne!(a, b);
        assert_eq!(editor.active_tier(), b);
        assert_eq!(editor.tiers().len(), 4);
    }

    #[test]
    fn config_collapses_cells_to_wire_shape() {
        let mut editor = LayoutEditor::new(2, 2);
        editor.set_tool(Tool::Erase);
        editor.apply(0, 0);

        let layout = editor.to_config().unwrap();
        assert_eq!(layout.strategy, ADVANCED_STRATEGY);
        assert!(layout.grid[0][0].is_gap());
        assert!(!layout.grid[0][1].is_gap());
        assert_eq!(layout.grid[1][1].t.as_deref(), Some("t1"));
    }

    #[test]
    fn duplicate_tier_names_are_rejected_at_save() {
        let mut editor = LayoutEditor::new(1, 1);
        editor.rename_tier("t2", "Standard").unwrap();
        let err = editor.to_config().unwrap_err();
        assert!(err.to_string().contains("Duplicate tier name"));
    }

    #[test]
    fn empty_tier_name_is_rejected_at_save() {
        let mut editor = LayoutEditor::new(1, 1);
        editor.rename_tier("t2", "   ").unwrap();
        assert!(editor.to_config().is_err());
    }

    #[test]
    fn save_payload_requires_a_name_and_serializes_config() {
        let editor = LayoutEditor::new(2, 3);
        assert!(editor.save_payload("  ").is_err());

        let payload = editor.save_payload("Screen 1").unwrap();
        assert_eq!(payload.total_rows, 2);
        assert_eq!(payload.total_cols, 3);
        assert!(payload.config.contains("\"strategy\":\"advanced\""));
        assert!(payload.config.contains("\"t\":\"t1\""));
    }
}
