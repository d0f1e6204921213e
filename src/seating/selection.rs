use std::collections::HashSet;

use crate::models::TicketRequest;
use crate::seating::PlanSeat;

/// Hard cap on concurrently selected seats per booking.
pub const MAX_SELECTED_SEATS: usize = 10;

/// Outcome of a seat click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Selected,
    Deselected,
    /// The seat is already sold; clicking it does nothing.
    AlreadyBooked,
    /// Selecting would exceed the cap; the selection is unchanged.
    LimitReached,
}

/// The user's current seat selection, in click order.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    seats: Vec<PlanSeat>,
}

impl Selection {
    /// Apply one click: booked seats are inert, selected seats deselect,
    /// available seats select subject to [`MAX_SELECTED_SEATS`].
    pub fn toggle(&mut self, seat: &PlanSeat, booked: &HashSet<String>) -> Toggle {
        if booked.contains(&seat.id) {
            return Toggle::AlreadyBooked;
        }
        if let Some(position) = self.seats.iter().position(|s| s.id == seat.id) {
            self.seats.remove(position);
            return Toggle::Deselected;
        }
        if self.seats.len() >= MAX_SELECTED_SEATS {
            return Toggle::LimitReached;
        }
        self.seats.push(seat.clone());
        Toggle::Selected
    }

    pub fn contains(&self, seat_id: &str) -> bool {
        self.seats.iter().any(|s| s.id == seat_id)
    }

    pub fn seats(&self) -> &[PlanSeat] {
        &self.seats
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    pub fn clear(&mut self) {
        self.seats.clear();
    }

    /// Recomputed on every call; never cached.
    pub fn total_price(&self) -> f64 {
        self.seats.iter().map(|s| s.price).sum()
    }

    pub fn tickets(&self) -> Vec<TicketRequest> {
        self.seats
            .iter()
            .map(|s| TicketRequest { section_id: s.section_id, row: s.row, col: s.col })
            .collect()
    }
}
