use async_trait::async_trait;
use serde::Deserialize;

use crate::utils::error::AppError;

mod stripe;

pub use stripe::StripeClient;

/// Session payment states reported by the provider.
pub const SESSION_PAID: &str = "paid";
pub const SESSION_UNPAID: &str = "unpaid";
pub const SESSION_NO_PAYMENT_REQUIRED: &str = "no_payment_required";

/// A checkout session as reported by the payment provider. The provider is
/// the source of truth for payment status; metadata carries the purchase
/// intent the checkout was created with.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    pub payment_status: String,
    #[serde(default)]
    pub amount_total: Option<i64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub metadata: SessionMetadata,
}

/// Checkout metadata is stringly typed on the provider side, so every field
/// arrives as an optional string and is validated by the handler.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionMetadata {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub event_id: Option<String>,
    #[serde(default)]
    pub quantity: Option<String>,
}

impl SessionMetadata {
    /// Ticket quantity for the purchase. Missing, unparsable, zero or
    /// negative values all coerce to 1: a settled purchase always registers
    /// at least one ticket.
    pub fn quantity(&self) -> i32 {
        self.quantity
            .as_deref()
            .and_then(|q| q.parse::<i32>().ok())
            .unwrap_or(1)
            .max(1)
    }
}

#[async_trait]
pub trait PaymentProvider: Send + Sync {
    async fn retrieve_checkout_session(&self, id: &str) -> Result<CheckoutSession, AppError>;
}
