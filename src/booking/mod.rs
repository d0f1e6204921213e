//! Booking-page flow.
//!
//! Drives one seat-booking session: `Loading → Ready → (toggles) →
//! Submitting → (Redirected | back to Ready with a notice)`. Failures are
//! never retried automatically and never lose the user's selection; they
//! surface as one-shot notices. Seat refreshes are sequence-tagged so a
//! stale response (rapid date switching) can never overwrite newer state.

use std::collections::HashSet;

use chrono::NaiveDateTime;
use tracing::{debug, info, warn};

use crate::api::ApiClient;
use crate::config::PaymentConfig;
use crate::error::{Error, Result};
use crate::models::{BookingRequest, CheckoutSessionRequest, Event};
use crate::seating::{SeatingPlan, Selection, Toggle};

pub const PAYMENT_METHOD_CARD: &str = "CARD";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Loading,
    Ready,
    Submitting,
    /// Terminal: the user has been handed the checkout URL.
    Redirected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A one-shot, non-blocking user notification.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Successful submission outcome: redirect the user to `url`.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutRedirect {
    pub booking_id: i64,
    pub url: String,
}

pub struct BookingFlow {
    api: ApiClient,
    payment: PaymentConfig,
    event_id: i64,
    date_param: Option<String>,
    state: FlowState,
    event: Option<Event>,
    plan: SeatingPlan,
    booked: HashSet<String>,
    selection: Selection,
    /// Monotonic tag of the latest issued seat fetch.
    fetch_seq: u64,
    notices: Vec<Notice>,
}

/// Resolve the show instant for a booking page.
///
/// A date parameter that already carries a time is used verbatim; a bare
/// date borrows the time part of the event's default show; no parameter
/// falls back to the event's default show entirely.
pub fn resolve_show_date(date_param: Option<&str>, event_date: Option<&str>) -> Option<String> {
    match date_param {
        Some(param) if param.contains('T') => Some(param.to_string()),
        Some(param) => event_date
            .and_then(|date| date.split_once('T'))
            .map(|(_, time)| format!("{param}T{time}")),
        None => event_date.map(str::to_string),
    }
}

/// The API speaks ISO-8601 local datetimes, with or without seconds.
pub fn is_valid_show_date(value: &str) -> bool {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S").is_ok()
        || NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M").is_ok()
}

impl BookingFlow {
    pub fn new(
        api: ApiClient,
        payment: PaymentConfig,
        event_id: i64,
        date_param: Option<String>,
    ) -> Self {
        BookingFlow {
            api,
            payment,
            event_id,
            date_param,
            state: FlowState::Loading,
            event: None,
            plan: SeatingPlan::Legacy(Vec::new()),
            booked: HashSet::new(),
            selection: Selection::default(),
            fetch_seq: 0,
            notices: Vec::new(),
        }
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn event(&self) -> Option<&Event> {
        self.event.as_ref()
    }

    pub fn plan(&self) -> &SeatingPlan {
        &self.plan
    }

    pub fn booked(&self) -> &HashSet<String> {
        &self.booked
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn total_price(&self) -> f64 {
        self.selection.total_price()
    }

    pub fn show_date(&self) -> Option<String> {
        resolve_show_date(
            self.date_param.as_deref(),
            self.event.as_ref().and_then(|e| e.date.as_deref()),
        )
    }

    /// Drain pending notices. Each is reported exactly once.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn notify_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("{message}");
        self.notices.push(Notice { level: NoticeLevel::Error, message });
    }

    fn notify_info(&mut self, message: impl Into<String>) {
        let message = message.into();
        info!("{message}");
        self.notices.push(Notice { level: NoticeLevel::Info, message });
    }

    /// Fetch the event and the booked seats for the resolved show date.
    ///
    /// An event failure leaves the page in `Loading` with a notice; a
    /// booked-seats failure keeps the page usable with an empty booked set.
    pub async fn load(&mut self) -> Result<()> {
        self.state = FlowState::Loading;

        let event = match self.api.event(self.event_id).await {
            Ok(event) => event,
            Err(e) => {
                self.notify_error("Failed to load event details");
                return Err(e);
            }
        };
        self.plan = SeatingPlan::from_event(&event);
        self.event = Some(event);

        if let Some(show_date) = self.show_date() {
            let token = self.begin_fetch();
            let result = self.api.booked_seats(self.event_id, &show_date).await;
            match result {
                Ok(seats) => {
                    self.apply_booked_seats(token, seats);
                }
                Err(e) => {
                    warn!("failed to load booked seats: {e}");
                    self.notify_error("Could not load booked seats for this date");
                }
            }
        }

        self.state = FlowState::Ready;
        Ok(())
    }

    /// Tag a new seat fetch. Any response carrying an older tag is stale.
    pub fn begin_fetch(&mut self) -> u64 {
        self.fetch_seq += 1;
        self.fetch_seq
    }

    /// Apply a booked-seats response. Returns false (and changes nothing)
    /// when a newer fetch has been issued since `token` was taken.
    pub fn apply_booked_seats(&mut self, token: u64, seats: Vec<String>) -> bool {
        if token != self.fetch_seq {
            debug!(token, current = self.fetch_seq, "discarding stale seat response");
            return false;
        }
        self.booked = seats.into_iter().collect();
        true
    }

    /// Switch to another show date and refresh the booked set.
    pub async fn switch_date(&mut self, date_param: Option<String>) -> Result<()> {
        self.date_param = date_param;
        let Some(show_date) = self.show_date() else {
            return Err(Error::Validation("Invalid show time/date. Please select a date.".into()));
        };
        let token = self.begin_fetch();
        match self.api.booked_seats(self.event_id, &show_date).await {
            Ok(seats) => {
                self.apply_booked_seats(token, seats);
                Ok(())
            }
            Err(e) => {
                self.notify_error("Could not load booked seats for this date");
                Err(e)
            }
        }
    }

    /// Handle a click on a seat identifier. Unknown identifiers (gaps,
    /// off-plan clicks) are rejected without touching the selection.
    pub fn toggle_seat(&mut self, seat_id: &str) -> Result<Toggle> {
        let seat = self
            .plan
            .find_seat(seat_id)
            .cloned()
            .ok_or_else(|| Error::Validation(format!("no such seat: {seat_id}")))?;

        let outcome = self.selection.toggle(&seat, &self.booked);
        if outcome == Toggle::LimitReached {
            self.notify_error("You can only select up to 10 seats");
        }
        Ok(outcome)
    }

    /// Create the pending booking and its checkout session.
    ///
    /// Any failure returns the flow to `Ready` with the selection intact.
    /// If the booking was created but the checkout session was not, the
    /// pending booking remains recoverable via pay-now on the bookings list.
    pub async fn submit(&mut self) -> Result<CheckoutRedirect> {
        if self.selection.is_empty() {
            let message = "Please select at least one seat";
            self.notify_error(message);
            return Err(Error::Validation(message.into()));
        }
        let show_date = match self.show_date() {
            Some(date) if is_valid_show_date(&date) => date,
            _ => {
                let message = "Invalid show time/date. Please select a date.";
                self.notify_error(message);
                return Err(Error::Validation(message.into()));
            }
        };

        self.state = FlowState::Submitting;

        let request = BookingRequest {
            event_id: self.event_id,
            show_date,
            tickets: self.selection.tickets(),
            payment_method: PAYMENT_METHOD_CARD.to_string(),
        };
        let booking = match self.api.create_booking(&request).await {
            Ok(booking) => booking,
            Err(e) => {
                self.state = FlowState::Ready;
                self.notify_error(match &e {
                    Error::Api { message, .. } => message.clone(),
                    _ => "Booking initiation failed".to_string(),
                });
                return Err(e);
            }
        };
        self.notify_info("Booking initiated! Redirecting to checkout...");

        let checkout = CheckoutSessionRequest {
            booking_id: booking.booking_id,
            amount: self.selection.total_price(),
            success_url: self.payment.success_url.clone(),
            cancel_url: self.payment.cancel_url.clone(),
        };
        match self.api.create_checkout_session(&checkout).await {
            Ok(session) => {
                self.state = FlowState::Redirected;
                Ok(CheckoutRedirect { booking_id: booking.booking_id, url: session.url })
            }
            Err(e) => {
                self.state = FlowState::Ready;
                self.notify_error(format!(
                    "Checkout could not be started; booking #{} is pending and can be paid \
                     from your bookings list",
                    booking.booking_id
                ));
                Err(e)
            }
        }
    }
}
