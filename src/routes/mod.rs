use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::config::{create_cors_layer, with_security_headers};
use crate::handlers::{cancel_ticket_handler, confirm_purchase_handler, health_check};
use crate::state::AppState;

pub fn create_routes(state: AppState) -> Router {
    let router = Router::new()
        .route("/health", get(health_check))
        .route("/api/tickets/confirm", post(confirm_purchase_handler))
        .route("/api/tickets/cancel", post(cancel_ticket_handler))
        .with_state(state);

    with_security_headers(router)
        .layer(create_cors_layer())
        .layer(TraceLayer::new_for_http())
}
