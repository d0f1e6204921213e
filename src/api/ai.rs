use serde::{Deserialize, Serialize};

use crate::api::ApiClient;
use crate::error::{Error, Result};
use crate::models::Event;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    query: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    response: String,
}

impl ApiClient {
    /// `POST /ai/chat` — free-text question answered against the catalogue.
    pub async fn chat(&self, query: &str) -> Result<String> {
        if query.trim().is_empty() {
            return Err(Error::Validation("Query cannot be empty".to_string()));
        }
        let response: ChatResponse = self.post("/ai/chat", &ChatRequest { query }).await?;
        Ok(response.response)
    }

    /// `GET /ai/recommendations` — events picked for the current user.
    pub async fn recommendations(&self) -> Result<Vec<Event>> {
        self.get("/ai/recommendations").await
    }
}
