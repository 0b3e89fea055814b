use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

pub mod cancel;
pub mod confirm;

pub use cancel::cancel_ticket_handler;
pub use confirm::confirm_purchase_handler;

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
}

pub async fn health_check() -> Response {
    let payload = HealthPayload {
        status: "ok",
        service: "myecclesia-api",
    };

    Json(payload).into_response()
}
