use crate::api::{check_valid, ApiClient};
use crate::error::Result;
use crate::models::{NewLayout, StoredLayout};

impl ApiClient {
    /// `GET /seating-layouts`.
    pub async fn layouts(&self) -> Result<Vec<StoredLayout>> {
        self.get("/seating-layouts").await
    }

    /// `GET /seating-layouts/{id}`.
    pub async fn layout(&self, id: i64) -> Result<StoredLayout> {
        self.get(&format!("/seating-layouts/{id}")).await
    }

    /// `POST /seating-layouts` (admin). Layouts are immutable once saved;
    /// editing means saving a new one.
    pub async fn create_layout(&self, payload: &NewLayout) -> Result<StoredLayout> {
        check_valid(payload)?;
        self.post("/seating-layouts", payload).await
    }

    /// `DELETE /seating-layouts/{id}` (admin).
    pub async fn delete_layout(&self, id: i64) -> Result<()> {
        self.delete(&format!("/seating-layouts/{id}")).await
    }
}
