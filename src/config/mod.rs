use serde::Deserialize;
use std::env;
use std::path::PathBuf;

// Top-level configuration container for the client.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub api: ApiConfig,
    pub payment: PaymentConfig,
    pub session: SessionConfig,
}

// Process-wide settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub rust_log: String,
}

// Settings for the EventMate REST API.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

// Redirect targets handed to the checkout-session endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    pub success_url: String,
    pub cancel_url: String,
}

// Where the persisted auth session lives between runs.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub file: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            app: AppConfig {
                rust_log: env::var("RUST_LOG")
                    .unwrap_or_else(|_| "eventmate_client=info".to_string()),
            },
            api: ApiConfig {
                base_url: env::var("API_BASE_URL")
                    .unwrap_or_else(|_| "http://localhost:8080/api".to_string()),
                timeout_seconds: env::var("API_TIMEOUT_SECONDS")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse()
                    .expect("API_TIMEOUT_SECONDS must be a valid number"),
            },
            payment: PaymentConfig {
                success_url: env::var("PAYMENT_SUCCESS_URL")
                    .unwrap_or_else(|_| "http://localhost:3000/payment/success".to_string()),
                cancel_url: env::var("PAYMENT_CANCEL_URL")
                    .unwrap_or_else(|_| "http://localhost:3000/payment/cancel".to_string()),
            },
            session: SessionConfig {
                file: env::var("SESSION_FILE")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from(".eventmate/session.json")),
            },
        }
    }
}
