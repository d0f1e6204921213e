use crate::api::ApiClient;
use crate::error::Result;
use crate::models::{BookingRecord, BookingRequest};

impl ApiClient {
    /// `POST /bookings` — creates a pending booking awaiting payment.
    pub async fn create_booking(&self, request: &BookingRequest) -> Result<BookingRecord> {
        self.post("/bookings", request).await
    }

    /// `GET /bookings/my-bookings` — the current user's bookings.
    pub async fn my_bookings(&self) -> Result<Vec<BookingRecord>> {
        self.get("/bookings/my-bookings").await
    }

    /// `GET /bookings/{id}`.
    pub async fn booking(&self, id: i64) -> Result<BookingRecord> {
        self.get(&format!("/bookings/{id}")).await
    }

    /// `GET /bookings/event/{id}/seats?showDate=` — flat seat identifiers
    /// (`"{section}-{row}-{col}"`) already booked for one show instance.
    pub async fn booked_seats(&self, event_id: i64, show_date: &str) -> Result<Vec<String>> {
        self.get_with_query(
            &format!("/bookings/event/{event_id}/seats"),
            &[("showDate", show_date)],
        )
        .await
    }
}
