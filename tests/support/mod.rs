#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use myecclesia_server::auth::AuthUser;
use myecclesia_server::models::order::{ORDER_PAID, ORDER_PENDING};
use myecclesia_server::models::registration::{
    RegistrationUpsert, PAYMENT_PAID, REGISTRATION_CANCELLED, REGISTRATION_REGISTERED,
};
use myecclesia_server::models::ticket::{NOT_CHECKED_IN, TICKET_ACTIVE, TICKET_CANCELLED};
use myecclesia_server::models::{
    Event, EventRegistration, EventTicketOrder, TicketType, TicketWithEvent,
};
use myecclesia_server::payments::{CheckoutSession, PaymentProvider, SessionMetadata};
use myecclesia_server::store::TicketStore;
use myecclesia_server::utils::error::AppError;

/// Flip a flag to make the corresponding store write fail, so tests can
/// distinguish fatal writes from best-effort ones.
#[derive(Default)]
pub struct Failures {
    pub order_update: bool,
    pub registration_upsert: bool,
    pub inventory_write: bool,
    pub registration_cancel: bool,
    pub ticket_type_write: bool,
}

#[derive(Default)]
pub struct InMemoryStore {
    pub events: Mutex<HashMap<Uuid, Event>>,
    pub registrations: Mutex<HashMap<(Uuid, Uuid), EventRegistration>>,
    pub tickets: Mutex<HashMap<Uuid, TicketWithEvent>>,
    pub ticket_types: Mutex<HashMap<Uuid, TicketType>>,
    pub orders: Mutex<HashMap<String, EventTicketOrder>>,
    pub fail: Failures,
}

fn injected() -> AppError {
    AppError::InternalServerError("injected store failure".to_string())
}

impl InMemoryStore {
    pub fn seed_event(&self, event: Event) -> Uuid {
        let id = event.id;
        self.events.lock().unwrap().insert(id, event);
        id
    }

    pub fn seed_ticket(&self, ticket: TicketWithEvent) -> Uuid {
        let id = ticket.id;
        self.tickets.lock().unwrap().insert(id, ticket);
        id
    }

    pub fn seed_ticket_type(&self, ticket_type: TicketType) -> Uuid {
        let id = ticket_type.id;
        self.ticket_types.lock().unwrap().insert(id, ticket_type);
        id
    }

    pub fn seed_order(&self, order: EventTicketOrder) {
        self.orders
            .lock()
            .unwrap()
            .insert(order.stripe_session_id.clone(), order);
    }

    pub fn registration_count(&self) -> usize {
        self.registrations.lock().unwrap().len()
    }

    pub fn registration(&self, user_id: Uuid, event_id: Uuid) -> Option<EventRegistration> {
        self.registrations
            .lock()
            .unwrap()
            .get(&(user_id, event_id))
            .cloned()
    }

    pub fn available_tickets(&self, event_id: Uuid) -> Option<i32> {
        self.events
            .lock()
            .unwrap()
            .get(&event_id)
            .and_then(|e| e.available_tickets)
    }

    pub fn ticket_status(&self, ticket_id: Uuid) -> String {
        self.tickets.lock().unwrap()[&ticket_id].status.clone()
    }

    pub fn quantity_sold(&self, type_id: Uuid) -> i32 {
        self.ticket_types.lock().unwrap()[&type_id].quantity_sold
    }

    pub fn order_status(&self, session_id: &str) -> String {
        self.orders.lock().unwrap()[session_id].status.clone()
    }
}

#[async_trait]
impl TicketStore for InMemoryStore {
    async fn fetch_event(&self, event_id: Uuid) -> Result<Option<Event>, AppError> {
        Ok(self.events.lock().unwrap().get(&event_id).cloned())
    }

    async fn set_available_tickets(
        &self,
        event_id: Uuid,
        remaining: i32,
    ) -> Result<(), AppError> {
        if self.fail.inventory_write {
            return Err(injected());
        }
        if let Some(event) = self.events.lock().unwrap().get_mut(&event_id) {
            event.available_tickets = Some(remaining);
        }
        Ok(())
    }

    async fn fetch_registration(
        &self,
        user_id: Uuid,
        event_id: Uuid,
    ) -> Result<Option<EventRegistration>, AppError> {
        Ok(self
            .registrations
            .lock()
            .unwrap()
            .get(&(user_id, event_id))
            .cloned())
    }

    async fn upsert_registration(&self, reg: &RegistrationUpsert) -> Result<(), AppError> {
        if self.fail.registration_upsert {
            return Err(injected());
        }
        let mut registrations = self.registrations.lock().unwrap();
        let key = (reg.user_id, reg.event_id);
        match registrations.get_mut(&key) {
            Some(existing) => {
                existing.status = REGISTRATION_REGISTERED.to_string();
                existing.quantity = reg.quantity;
                existing.payment_status = PAYMENT_PAID.to_string();
                existing.stripe_session_id = Some(reg.stripe_session_id.clone());
                existing.updated_at = Utc::now();
            }
            None => {
                registrations.insert(
                    key,
                    EventRegistration {
                        id: Uuid::new_v4(),
                        user_id: reg.user_id,
                        event_id: reg.event_id,
                        status: REGISTRATION_REGISTERED.to_string(),
                        quantity: reg.quantity,
                        payment_status: PAYMENT_PAID.to_string(),
                        stripe_session_id: Some(reg.stripe_session_id.clone()),
                        created_at: Utc::now(),
                        updated_at: Utc::now(),
                    },
                );
            }
        }
        Ok(())
    }

    async fn cancel_registration(&self, event_id: Uuid, user_id: Uuid) -> Result<(), AppError> {
        if self.fail.registration_cancel {
            return Err(injected());
        }
        if let Some(reg) = self
            .registrations
            .lock()
            .unwrap()
            .get_mut(&(user_id, event_id))
        {
            reg.status = REGISTRATION_CANCELLED.to_string();
        }
        Ok(())
    }

    async fn mark_order_paid(
        &self,
        session_id: &str,
        amount_pence: Option<i64>,
        currency: Option<&str>,
    ) -> Result<bool, AppError> {
        if self.fail.order_update {
            return Err(injected());
        }
        match self.orders.lock().unwrap().get_mut(session_id) {
            Some(order) => {
                order.status = ORDER_PAID.to_string();
                if amount_pence.is_some() {
                    order.amount_pence = amount_pence;
                }
                if let Some(currency) = currency {
                    order.currency = Some(currency.to_string());
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn fetch_ticket_with_event(
        &self,
        ticket_id: Uuid,
    ) -> Result<Option<TicketWithEvent>, AppError> {
        Ok(self.tickets.lock().unwrap().get(&ticket_id).cloned())
    }

    async fn cancel_ticket(&self, ticket_id: Uuid) -> Result<(), AppError> {
        if let Some(ticket) = self.tickets.lock().unwrap().get_mut(&ticket_id) {
            ticket.status = TICKET_CANCELLED.to_string();
        }
        Ok(())
    }

    async fn fetch_ticket_type(&self, type_id: Uuid) -> Result<Option<TicketType>, AppError> {
        Ok(self.ticket_types.lock().unwrap().get(&type_id).cloned())
    }

    async fn set_ticket_type_sold(
        &self,
        type_id: Uuid,
        quantity_sold: i32,
    ) -> Result<(), AppError> {
        if self.fail.ticket_type_write {
            return Err(injected());
        }
        if let Some(ticket_type) = self.ticket_types.lock().unwrap().get_mut(&type_id) {
            ticket_type.quantity_sold = quantity_sold;
        }
        Ok(())
    }
}

/// Payment provider double backed by a fixed set of sessions.
#[derive(Default)]
pub struct FakeProvider {
    pub sessions: HashMap<String, CheckoutSession>,
}

impl FakeProvider {
    pub fn with_session(session: CheckoutSession) -> Self {
        let mut sessions = HashMap::new();
        sessions.insert(session.id.clone(), session);
        Self { sessions }
    }
}

#[async_trait]
impl PaymentProvider for FakeProvider {
    async fn retrieve_checkout_session(&self, id: &str) -> Result<CheckoutSession, AppError> {
        self.sessions
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Checkout session '{id}' was not found")))
    }
}

pub fn caller(id: Uuid) -> AuthUser {
    AuthUser {
        id,
        email: Some("member@example.org".to_string()),
    }
}

pub fn future_event(available_tickets: Option<i32>) -> Event {
    Event {
        id: Uuid::new_v4(),
        title: "Harvest Celebration".to_string(),
        date: NaiveDate::from_ymd_opt(2030, 6, 1).unwrap(),
        time: NaiveTime::from_hms_opt(18, 30, 0).unwrap(),
        available_tickets,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn session(
    id: &str,
    payment_status: &str,
    user_id: Uuid,
    event_id: Uuid,
    quantity: Option<&str>,
) -> CheckoutSession {
    CheckoutSession {
        id: id.to_string(),
        payment_status: payment_status.to_string(),
        amount_total: Some(2500),
        currency: Some("gbp".to_string()),
        metadata: SessionMetadata {
            user_id: Some(user_id.to_string()),
            event_id: Some(event_id.to_string()),
            quantity: quantity.map(str::to_string),
        },
    }
}

pub fn active_ticket(user_id: Uuid, event_id: Uuid, event_date: NaiveDate) -> TicketWithEvent {
    TicketWithEvent {
        id: Uuid::new_v4(),
        user_id,
        event_id,
        ticket_type_id: None,
        quantity: 1,
        status: TICKET_ACTIVE.to_string(),
        check_in_status: NOT_CHECKED_IN.to_string(),
        event_date,
        event_title: "Spring Gathering".to_string(),
    }
}

pub fn ticket_type(event_id: Uuid, quantity_sold: i32) -> TicketType {
    TicketType {
        id: Uuid::new_v4(),
        event_id,
        name: "General".to_string(),
        quantity_sold,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn pending_order(session_id: &str, user_id: Uuid, event_id: Uuid) -> EventTicketOrder {
    EventTicketOrder {
        id: Uuid::new_v4(),
        user_id,
        event_id,
        stripe_session_id: session_id.to_string(),
        status: ORDER_PENDING.to_string(),
        amount_pence: None,
        currency: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}
