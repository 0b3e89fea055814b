use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use serde::Deserialize;
use uuid::Uuid;

use crate::state::AppState;
use crate::utils::error::AppError;

/// The authenticated caller, resolved from the bearer credential by the
/// hosted auth provider. Handlers never see the raw token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: Option<String>,
}

#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn resolve(&self, token: &str) -> Result<AuthUser, AppError>;
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?.to_string();
        state.auth.resolve(&token).await
    }
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let auth_header = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::AuthError("Missing authorization header".to_string()))?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        AppError::AuthError("Invalid authorization format. Expected 'Bearer <token>'".to_string())
    })?;

    if token.is_empty() {
        return Err(AppError::AuthError("Empty bearer token".to_string()));
    }

    Ok(token)
}

/// Client for the hosted auth provider's user endpoint. A bearer token is
/// valid exactly when the provider answers 2xx for it.
pub struct GoTrueClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct AuthUserPayload {
    id: Uuid,
    #[serde(default)]
    email: Option<String>,
}

impl GoTrueClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }
}

#[async_trait]
impl Authenticator for GoTrueClient {
    async fn resolve(&self, token: &str) -> Result<AuthUser, AppError> {
        let url = format!("{}/auth/v1/user", self.base_url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .header("apikey", &self.api_key)
            .send()
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!("auth provider unreachable: {e}"))
            })?;

        if !response.status().is_success() {
            return Err(AppError::AuthError(
                "Invalid or expired credential".to_string(),
            ));
        }

        let payload = response.json::<AuthUserPayload>().await.map_err(|e| {
            AppError::ExternalServiceError(format!(
                "auth provider returned an unreadable user: {e}"
            ))
        })?;

        Ok(AuthUser {
            id: payload.id,
            email: payload.email,
        })
    }
}
