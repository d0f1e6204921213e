use serde_json::Value;
use tracing::info;

use crate::api::{check_valid, ApiClient};
use crate::error::Result;
use crate::models::{AuthResponse, LoginRequest, OtpLoginRequest, OtpRequest, RegisterRequest};
use crate::session::Session;

impl ApiClient {
    /// `POST /auth/login`. On success the session is stored so subsequent
    /// calls carry the bearer token.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let request = LoginRequest { email: email.to_string(), password: password.to_string() };
        let response: AuthResponse = self.post("/auth/login", &request).await?;
        self.session().login(Session::from(&response))?;
        info!("logged in as {}", email);
        Ok(response)
    }

    /// `POST /auth/register`. Registration does not log the user in.
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse> {
        check_valid(request)?;
        self.post("/auth/register", request).await
    }

    /// `POST /auth/otp/generate` — emails a one-time password.
    pub async fn generate_otp(&self, email: &str) -> Result<()> {
        let request = OtpRequest { email: email.to_string() };
        let _: Value = self.post("/auth/otp/generate", &request).await?;
        Ok(())
    }

    /// `POST /auth/otp/login`. Stores the session like a password login.
    pub async fn login_with_otp(&self, email: &str, otp: &str) -> Result<AuthResponse> {
        let request = OtpLoginRequest { email: email.to_string(), otp: otp.to_string() };
        let response: AuthResponse = self.post("/auth/otp/login", &request).await?;
        self.session().login(Session::from(&response))?;
        Ok(response)
    }

    /// `POST /auth/forgot-password`.
    pub async fn forgot_password(&self, email: &str) -> Result<()> {
        let request = OtpRequest { email: email.to_string() };
        let _: Value = self.post("/auth/forgot-password", &request).await?;
        Ok(())
    }

    /// Drop the local session. Purely client-side; the token is stateless.
    pub fn logout(&self) -> Result<()> {
        self.session().logout()
    }
}
