use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const REGISTRATION_REGISTERED: &str = "registered";
pub const REGISTRATION_CANCELLED: &str = "cancelled";
pub const PAYMENT_PAID: &str = "paid";
pub const PAYMENT_PENDING: &str = "pending";

/// One row per `(user_id, event_id)` pair; the table carries a unique
/// constraint on that pair so a re-confirmed purchase overwrites rather
/// than duplicates.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EventRegistration {
    pub id: Uuid,
    pub user_id: Uuid,
    pub event_id: Uuid,
    pub status: String,
    pub quantity: i32,
    pub payment_status: String,
    pub stripe_session_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for the registration upsert. Status fields are fixed by the
/// confirmation flow, so only the variable parts appear here.
#[derive(Debug, Clone)]
pub struct RegistrationUpsert {
    pub user_id: Uuid,
    pub event_id: Uuid,
    pub quantity: i32,
    pub stripe_session_id: String,
}
