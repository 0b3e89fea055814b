use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const ORDER_PENDING: &str = "pending";
pub const ORDER_PAID: &str = "paid";

/// Order-level record keyed by the checkout session id. Settling it is a
/// best-effort step of confirmation; the registration row is the source of
/// truth.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EventTicketOrder {
    pub id: Uuid,
    pub user_id: Uuid,
    pub event_id: Uuid,
    pub stripe_session_id: String,
    pub status: String,
    pub amount_pence: Option<i64>,
    pub currency: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
