pub mod api;
pub mod booking;
pub mod config;
pub mod error;
pub mod layout;
pub mod models;
pub mod seating;
pub mod session;

pub use error::{Error, Result};

// Shared state for the whole client application.
#[derive(Clone)]
pub struct AppState {
    pub config: config::Config,
    pub session: session::SessionStore,
    pub api: api::ApiClient,
}

impl AppState {
    pub fn new(config: config::Config) -> Self {
        let session = session::SessionStore::load(&config.session);
        let api = api::ApiClient::from_config(&config.api, session.clone());
        Self { config, session, api }
    }

    /// Start a booking-page flow for one event/show combination.
    pub fn booking_flow(&self, event_id: i64, date_param: Option<String>) -> booking::BookingFlow {
        booking::BookingFlow::new(
            self.api.clone(),
            self.config.payment.clone(),
            event_id,
            date_param,
        )
    }
}
