use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong on the client side. None of these are
/// retried automatically; callers surface them as notices.
#[derive(Debug, Error)]
pub enum Error {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A non-2xx response, carrying the server's own message when it sent one.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("{0}")]
    Validation(String),

    /// A persisted layout config that is neither the legacy array nor the
    /// advanced grid shape.
    #[error("malformed layout config: {0}")]
    MalformedLayout(String),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("session storage: {0}")]
    Session(#[from] std::io::Error),
}

impl Error {
    /// True for failures the user can fix by changing their input, as
    /// opposed to transport or server trouble.
    pub fn is_client_error(&self) -> bool {
        match self {
            Error::Validation(_) | Error::MalformedLayout(_) => true,
            Error::Api { status, .. } => (400..500).contains(status),
            _ => false,
        }
    }
}
