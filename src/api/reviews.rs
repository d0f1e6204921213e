use crate::api::{check_valid, ApiClient};
use crate::error::Result;
use crate::models::{Review, ReviewRequest};

impl ApiClient {
    /// `GET /reviews/event/{eventId}`.
    pub async fn event_reviews(&self, event_id: i64) -> Result<Vec<Review>> {
        self.get(&format!("/reviews/event/{event_id}")).await
    }

    /// `POST /reviews` — add a review for an event the user attended.
    pub async fn add_review(&self, request: &ReviewRequest) -> Result<Review> {
        check_valid(request)?;
        self.post("/reviews", request).await
    }
}
