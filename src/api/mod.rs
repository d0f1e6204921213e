//! HTTP client for the EventMate REST API.
//!
//! `ApiClient` wraps a shared `reqwest::Client` with the API base URL and the
//! session store; protected calls carry the bearer token automatically. All
//! responses are decoded in one place: non-2xx statuses become
//! [`Error::Api`] with the server's `message`/`error` body when present.
//! Endpoint methods live in per-domain submodules.

pub mod ai;
pub mod auth;
pub mod bookings;
pub mod events;
pub mod layouts;
pub mod payments;
pub mod reviews;

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::session::SessionStore;

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: SessionStore,
}

impl ApiClient {
    pub fn from_config(config: &ApiConfig, session: SessionStore) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(config.timeout_seconds))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut req = self.http.request(method, format!("{}{}", self.base_url, path));
        if let Some(token) = self.session.token() {
            req = req.bearer_auth(token);
        }
        req
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }
        Err(Error::Api {
            status: status.as_u16(),
            message: Self::error_message(response).await.unwrap_or_else(|| {
                status.canonical_reason().unwrap_or("request failed").to_string()
            }),
        })
    }

    /// The server reports failures as `{"message": ...}` (validation) or
    /// `{"error": ...}` (payments, AI). Fall back to the raw body.
    async fn error_message(response: Response) -> Option<String> {
        let body = response.text().await.ok()?;
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(&body) {
            for key in ["message", "error"] {
                if let Some(message) = value.get(key).and_then(|v| v.as_str()) {
                    return Some(message.to_string());
                }
            }
        }
        let body = body.trim();
        (!body.is_empty()).then(|| body.to_string())
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        Self::decode(self.request(Method::GET, path).send().await?).await
    }

    pub(crate) async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        Self::decode(self.request(Method::GET, path).query(query).send().await?).await
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        Self::decode(self.request(Method::POST, path).json(body).send().await?).await
    }

    pub(crate) async fn put<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        Self::decode(self.request(Method::PUT, path).json(body).send().await?).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        let response = self.request(Method::DELETE, path).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        Err(Error::Api {
            status: status.as_u16(),
            message: Self::error_message(response).await.unwrap_or_else(|| {
                status.canonical_reason().unwrap_or("request failed").to_string()
            }),
        })
    }
}

/// Map outbound-payload validation failures onto the client error type.
pub(crate) fn check_valid<T: validator::Validate>(payload: &T) -> Result<()> {
    payload
        .validate()
        .map_err(|e| Error::Validation(flatten_validation_errors(&e)))
}

fn flatten_validation_errors(errors: &validator::ValidationErrors) -> String {
    let mut parts: Vec<String> = Vec::new();
    for (field, kinds) in errors.field_errors() {
        for kind in kinds {
            match &kind.message {
                Some(message) => parts.push(message.to_string()),
                None => parts.push(format!("{field} is invalid")),
            }
        }
    }
    parts.sort();
    parts.join("; ")
}
