use tracing::info;

use crate::api::ApiClient;
use crate::config::PaymentConfig;
use crate::error::{Error, Result};
use crate::models::{CheckoutSession, CheckoutSessionRequest};

impl ApiClient {
    /// `POST /payments/create-checkout-session` — returns the redirect URL
    /// of a hosted checkout page for a pending booking.
    pub async fn create_checkout_session(
        &self,
        request: &CheckoutSessionRequest,
    ) -> Result<CheckoutSession> {
        let session: CheckoutSession = self.post("/payments/create-checkout-session", request).await?;
        info!(booking_id = request.booking_id, "checkout session created");
        Ok(session)
    }

    /// Re-initiate payment for a booking whose checkout never completed.
    ///
    /// This is the compensating action for the one partial-failure path in
    /// the booking flow: the booking exists server-side in a pending state,
    /// so a fresh checkout session for its recorded total settles it.
    pub async fn pay_now(&self, booking_id: i64, payment: &PaymentConfig) -> Result<CheckoutSession> {
        let bookings = self.my_bookings().await?;
        let booking = bookings
            .iter()
            .find(|b| b.booking_id == booking_id)
            .ok_or_else(|| Error::Validation(format!("booking {booking_id} not found")))?;

        if !booking.is_pending() {
            return Err(Error::Validation(format!(
                "booking {booking_id} is not awaiting payment"
            )));
        }
        let amount = booking.total_amount.ok_or_else(|| {
            Error::Validation(format!("booking {booking_id} has no recorded total"))
        })?;

        self.create_checkout_session(&CheckoutSessionRequest {
            booking_id,
            amount,
            success_url: payment.success_url.clone(),
            cancel_url: payment.cancel_url.clone(),
        })
        .await
    }
}
