use crate::api::{check_valid, ApiClient};
use crate::error::Result;
use crate::models::{Event, EventPayload};

impl ApiClient {
    /// `GET /events` — published events.
    pub async fn events(&self) -> Result<Vec<Event>> {
        self.get("/events").await
    }

    /// `GET /events/all` — admin listing, including unpublished events.
    pub async fn all_events(&self) -> Result<Vec<Event>> {
        self.get("/events/all").await
    }

    /// `GET /events/{id}` — full event including sections and layout config.
    pub async fn event(&self, id: i64) -> Result<Event> {
        self.get(&format!("/events/{id}")).await
    }

    /// `GET /events/group/{groupId}` — sibling shows of a grouped event.
    pub async fn events_by_group(&self, group_id: &str) -> Result<Vec<Event>> {
        self.get(&format!("/events/group/{group_id}")).await
    }

    /// `GET /events/search?category=` — category search.
    pub async fn search_events(&self, category: &str) -> Result<Vec<Event>> {
        self.get_with_query("/events/search", &[("category", category)]).await
    }

    /// `POST /events` (admin).
    pub async fn create_event(&self, payload: &EventPayload) -> Result<Event> {
        check_valid(payload)?;
        self.post("/events", payload).await
    }

    /// `POST /events/batch` (admin) — create several shows at once.
    pub async fn create_events_batch(&self, payloads: &[EventPayload]) -> Result<Vec<Event>> {
        for payload in payloads {
            check_valid(payload)?;
        }
        self.post("/events/batch", payloads).await
    }

    /// `PUT /events/{id}` (admin).
    pub async fn update_event(&self, id: i64, payload: &EventPayload) -> Result<Event> {
        check_valid(payload)?;
        self.put(&format!("/events/{id}"), payload).await
    }

    /// `DELETE /events/{id}` (admin).
    pub async fn delete_event(&self, id: i64) -> Result<()> {
        self.delete(&format!("/events/{id}")).await
    }
}
