use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const TICKET_ACTIVE: &str = "active";
pub const TICKET_CANCELLED: &str = "cancelled";
pub const CHECKED_IN: &str = "checked_in";
pub const NOT_CHECKED_IN: &str = "not_checked_in";

/// An issued ticket instance, distinct from the registration row.
/// Cancellation is one-way: a cancelled ticket is never re-activated.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Ticket {
    pub id: Uuid,
    pub user_id: Uuid,
    pub event_id: Uuid,
    pub ticket_type_id: Option<Uuid>,
    pub quantity: i32,
    pub status: String,
    pub check_in_status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Optional categorization of a ticket ("General", "VIP") with a running
/// sold-count that cancellation winds back.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TicketType {
    pub id: Uuid,
    pub event_id: Uuid,
    pub name: String,
    pub quantity_sold: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Ticket joined with the fields of its parent event that the cancellation
/// rules need (the event date for the past-event check, the title for the
/// response message).
#[derive(Debug, Clone, FromRow)]
pub struct TicketWithEvent {
    pub id: Uuid,
    pub user_id: Uuid,
    pub event_id: Uuid,
    pub ticket_type_id: Option<Uuid>,
    pub quantity: i32,
    pub status: String,
    pub check_in_status: String,
    pub event_date: NaiveDate,
    pub event_title: String,
}
