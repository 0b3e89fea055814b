use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::order::ORDER_PAID;
use crate::models::registration::{
    RegistrationUpsert, PAYMENT_PAID, REGISTRATION_CANCELLED, REGISTRATION_REGISTERED,
};
use crate::models::ticket::TICKET_CANCELLED;
use crate::models::{Event, EventRegistration, TicketType, TicketWithEvent};
use crate::store::TicketStore;
use crate::utils::error::AppError;

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TicketStore for PgStore {
    async fn fetch_event(&self, event_id: Uuid) -> Result<Option<Event>, AppError> {
        let event = sqlx::query_as::<_, Event>(
            "SELECT id, title, date, time, available_tickets, created_at, updated_at
             FROM events WHERE id = $1",
        )
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    async fn set_available_tickets(
        &self,
        event_id: Uuid,
        remaining: i32,
    ) -> Result<(), AppError> {
        sqlx::query("UPDATE events SET available_tickets = $2, updated_at = now() WHERE id = $1")
            .bind(event_id)
            .bind(remaining)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn fetch_registration(
        &self,
        user_id: Uuid,
        event_id: Uuid,
    ) -> Result<Option<EventRegistration>, AppError> {
        let registration = sqlx::query_as::<_, EventRegistration>(
            "SELECT id, user_id, event_id, status, quantity, payment_status, stripe_session_id,
                    created_at, updated_at
             FROM event_registrations WHERE user_id = $1 AND event_id = $2",
        )
        .bind(user_id)
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(registration)
    }

    async fn upsert_registration(&self, reg: &RegistrationUpsert) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO event_registrations
                 (user_id, event_id, status, quantity, payment_status, stripe_session_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (user_id, event_id) DO UPDATE SET
                 status = EXCLUDED.status,
                 quantity = EXCLUDED.quantity,
                 payment_status = EXCLUDED.payment_status,
                 stripe_session_id = EXCLUDED.stripe_session_id,
                 updated_at = now()",
        )
        .bind(reg.user_id)
        .bind(reg.event_id)
        .bind(REGISTRATION_REGISTERED)
        .bind(reg.quantity)
        .bind(PAYMENT_PAID)
        .bind(&reg.stripe_session_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn cancel_registration(&self, event_id: Uuid, user_id: Uuid) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE event_registrations SET status = $3, updated_at = now()
             WHERE event_id = $1 AND user_id = $2",
        )
        .bind(event_id)
        .bind(user_id)
        .bind(REGISTRATION_CANCELLED)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn mark_order_paid(
        &self,
        session_id: &str,
        amount_pence: Option<i64>,
        currency: Option<&str>,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE event_ticket_orders SET
                 status = $2,
                 amount_pence = COALESCE($3, amount_pence),
                 currency = COALESCE($4, currency),
                 updated_at = now()
             WHERE stripe_session_id = $1",
        )
        .bind(session_id)
        .bind(ORDER_PAID)
        .bind(amount_pence)
        .bind(currency)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn fetch_ticket_with_event(
        &self,
        ticket_id: Uuid,
    ) -> Result<Option<TicketWithEvent>, AppError> {
        let ticket = sqlx::query_as::<_, TicketWithEvent>(
            "SELECT t.id, t.user_id, t.event_id, t.ticket_type_id, t.quantity, t.status,
                    t.check_in_status, e.date AS event_date, e.title AS event_title
             FROM tickets t
             JOIN events e ON e.id = t.event_id
             WHERE t.id = $1",
        )
        .bind(ticket_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(ticket)
    }

    async fn cancel_ticket(&self, ticket_id: Uuid) -> Result<(), AppError> {
        sqlx::query("UPDATE tickets SET status = $2, updated_at = now() WHERE id = $1")
            .bind(ticket_id)
            .bind(TICKET_CANCELLED)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn fetch_ticket_type(&self, type_id: Uuid) -> Result<Option<TicketType>, AppError> {
        let ticket_type = sqlx::query_as::<_, TicketType>(
            "SELECT id, event_id, name, quantity_sold, created_at, updated_at
             FROM ticket_types WHERE id = $1",
        )
        .bind(type_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(ticket_type)
    }

    async fn set_ticket_type_sold(
        &self,
        type_id: Uuid,
        quantity_sold: i32,
    ) -> Result<(), AppError> {
        sqlx::query("UPDATE ticket_types SET quantity_sold = $2, updated_at = now() WHERE id = $1")
            .bind(type_id)
            .bind(quantity_sold)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
