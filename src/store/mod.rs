use async_trait::async_trait;
use uuid::Uuid;

use crate::models::registration::RegistrationUpsert;
use crate::models::{Event, EventRegistration, TicketType, TicketWithEvent};
use crate::utils::error::AppError;

mod postgres;

pub use postgres::PgStore;

/// Row-level primitives against the persistent store. There is no
/// multi-statement transaction here: each method is a single statement, and
/// the handlers sequence them with explicit fallback on partial failure.
#[async_trait]
pub trait TicketStore: Send + Sync {
    async fn fetch_event(&self, event_id: Uuid) -> Result<Option<Event>, AppError>;

    async fn set_available_tickets(&self, event_id: Uuid, remaining: i32)
        -> Result<(), AppError>;

    async fn fetch_registration(
        &self,
        user_id: Uuid,
        event_id: Uuid,
    ) -> Result<Option<EventRegistration>, AppError>;

    /// Insert-or-overwrite on the `(user_id, event_id)` unique pair, marking
    /// the registration as registered and paid.
    async fn upsert_registration(&self, reg: &RegistrationUpsert) -> Result<(), AppError>;

    async fn cancel_registration(&self, event_id: Uuid, user_id: Uuid) -> Result<(), AppError>;

    /// Mark the order for a checkout session as paid, recording amount and
    /// currency when known. Returns whether a row was actually updated; an
    /// absent order row is tolerated.
    async fn mark_order_paid(
        &self,
        session_id: &str,
        amount_pence: Option<i64>,
        currency: Option<&str>,
    ) -> Result<bool, AppError>;

    async fn fetch_ticket_with_event(
        &self,
        ticket_id: Uuid,
    ) -> Result<Option<TicketWithEvent>, AppError>;

    async fn cancel_ticket(&self, ticket_id: Uuid) -> Result<(), AppError>;

    async fn fetch_ticket_type(&self, type_id: Uuid) -> Result<Option<TicketType>, AppError>;

    async fn set_ticket_type_sold(
        &self,
        type_id: Uuid,
        quantity_sold: i32,
    ) -> Result<(), AppError>;
}
