use async_trait::async_trait;
use reqwest::StatusCode;

use crate::payments::{CheckoutSession, PaymentProvider};
use crate::utils::error::AppError;

const STRIPE_API_BASE: &str = "https://api.stripe.com";

pub struct StripeClient {
    http: reqwest::Client,
    secret_key: String,
    api_base: String,
}

impl StripeClient {
    pub fn new(secret_key: &str) -> Self {
        Self::with_api_base(secret_key, STRIPE_API_BASE)
    }

    /// Point the client at a different API host. Used by tests against a
    /// local mock server.
    pub fn with_api_base(secret_key: &str, api_base: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            secret_key: secret_key.to_string(),
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl PaymentProvider for StripeClient {
    async fn retrieve_checkout_session(&self, id: &str) -> Result<CheckoutSession, AppError> {
        let url = format!("{}/v1/checkout/sessions/{}", self.api_base, id);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.secret_key)
            .send()
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!("payment provider unreachable: {e}"))
            })?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(AppError::NotFound(format!(
                "Checkout session '{id}' was not found"
            ))),
            status if status.is_success() => {
                response.json::<CheckoutSession>().await.map_err(|e| {
                    AppError::ExternalServiceError(format!(
                        "payment provider returned an unreadable session: {e}"
                    ))
                })
            }
            status => Err(AppError::ExternalServiceError(format!(
                "payment provider responded with status {status}"
            ))),
        }
    }
}
