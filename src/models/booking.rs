use serde::{Deserialize, Serialize};

/// One requested ticket, addressed by its persisted section and grid slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketRequest {
    pub section_id: i64,
    pub row: u32,
    pub col: u32,
}

/// Payload for `POST /bookings`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub event_id: i64,
    /// ISO-8601 local datetime of the booked show instance.
    pub show_date: String,
    pub tickets: Vec<TicketRequest>,
    pub payment_method: String,
}

/// A booking record, both the create response and a my-bookings row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    pub booking_id: i64,
    #[serde(default)]
    pub event_id: Option<i64>,
    #[serde(default)]
    pub event_title: Option<String>,
    #[serde(default)]
    pub booking_date: Option<String>,
    #[serde(default)]
    pub show_date: Option<String>,
    #[serde(default)]
    pub payment_status: Option<String>,
    #[serde(default)]
    pub total_amount: Option<f64>,
    /// Seat identifiers, `"{section}-{row}-{col}"`.
    #[serde(default)]
    pub tickets: Vec<String>,
}

impl BookingRecord {
    /// A booking whose checkout never completed; it can still be paid from
    /// the bookings list.
    pub fn is_pending(&self) -> bool {
        matches!(self.payment_status.as_deref(), Some("PENDING") | Some("pending"))
    }
}

/// Payload for `POST /payments/create-checkout-session`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSessionRequest {
    pub booking_id: i64,
    pub amount: f64,
    pub success_url: String,
    pub cancel_url: String,
}

/// Checkout-session response; the caller redirects the user to `url`.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSession {
    pub url: String,
}
