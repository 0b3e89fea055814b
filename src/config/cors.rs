use axum::http::{header, HeaderName, HeaderValue, Method};
use std::env;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

const PREFLIGHT_MAX_AGE_SECS: u64 = 86400;

/// Browser clients call the ticket endpoints cross-origin, so pre-flight
/// requests must succeed. Without `CORS_ALLOWED_ORIGINS` the layer answers
/// any origin; with it, only the listed origins (and credentials) pass.
pub fn create_cors_layer() -> CorsLayer {
    let methods = [Method::GET, Method::POST, Method::OPTIONS];
    let headers = [
        header::CONTENT_TYPE,
        header::AUTHORIZATION,
        header::ACCEPT,
        HeaderName::from_static("apikey"),
        HeaderName::from_static("x-client-info"),
    ];

    let layer = match configured_origins() {
        Some(origins) => {
            tracing::info!("CORS: restricted to {} configured origin(s)", origins.len());
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_credentials(true)
        }
        None => {
            tracing::info!("CORS: no origins configured, allowing any origin");
            CorsLayer::new().allow_origin(Any)
        }
    };

    layer
        .allow_methods(methods)
        .allow_headers(headers)
        .max_age(std::time::Duration::from_secs(PREFLIGHT_MAX_AGE_SECS))
}

fn configured_origins() -> Option<Vec<HeaderValue>> {
    let origins: Vec<HeaderValue> = env::var("CORS_ALLOWED_ORIGINS")
        .ok()?
        .split(',')
        .filter_map(|origin| {
            let trimmed = origin.trim();
            if trimmed.is_empty() {
                return None;
            }
            match trimmed.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!("CORS: Invalid origin '{}': {}", trimmed, e);
                    None
                }
            }
        })
        .collect();

    if origins.is_empty() {
        None
    } else {
        Some(origins)
    }
}
