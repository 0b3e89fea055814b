use axum::extract::State;
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::models::ticket::{CHECKED_IN, TICKET_CANCELLED};
use crate::state::AppState;
use crate::store::TicketStore;
use crate::utils::error::AppError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelRequest {
    #[serde(default)]
    pub ticket_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CancelResponse {
    pub success: bool,
    pub message: String,
}

pub async fn cancel_ticket_handler(
    State(state): State<AppState>,
    caller: AuthUser,
    body: Option<Json<CancelRequest>>,
) -> Result<Json<CancelResponse>, AppError> {
    let ticket_id = body
        .and_then(|Json(req)| req.ticket_id)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::ValidationError("ticketId is required".to_string()))?;

    let ticket_id: Uuid = ticket_id
        .parse()
        .map_err(|_| AppError::ValidationError("ticketId is not a valid id".to_string()))?;

    let today = Utc::now().date_naive();
    let message = cancel_ticket(state.store.as_ref(), &caller, ticket_id, today).await?;

    Ok(Json(CancelResponse {
        success: true,
        message,
    }))
}

/// Cancel an issued ticket. The ticket-level update is the authoritative
/// side effect; reverting the registration and winding back the ticket
/// type's sold-count are best-effort follow-ups.
///
/// The event's remaining-ticket counter is intentionally left untouched:
/// cancellation does not return stock to sale.
pub async fn cancel_ticket(
    store: &dyn TicketStore,
    caller: &AuthUser,
    ticket_id: Uuid,
    today: NaiveDate,
) -> Result<String, AppError> {
    let ticket = store
        .fetch_ticket_with_event(ticket_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Ticket '{ticket_id}' was not found")))?;

    if ticket.user_id != caller.id {
        return Err(AppError::Forbidden(
            "Ticket does not belong to the current user".to_string(),
        ));
    }

    // Cancelling twice is a no-op success; no side effects re-run.
    if ticket.status == TICKET_CANCELLED {
        return Ok("Ticket was already cancelled".to_string());
    }

    if ticket.check_in_status == CHECKED_IN {
        return Err(AppError::NotAllowed(
            "A checked-in ticket cannot be cancelled".to_string(),
        ));
    }

    if ticket.event_date < today {
        return Err(AppError::NotAllowed(
            "Tickets for past events cannot be cancelled".to_string(),
        ));
    }

    store.cancel_ticket(ticket_id).await?;

    if let Err(e) = store
        .cancel_registration(ticket.event_id, ticket.user_id)
        .await
    {
        warn!(error = %e, ticket_id = %ticket_id, "failed to revert event registration");
    }

    if let Some(type_id) = ticket.ticket_type_id {
        match store.fetch_ticket_type(type_id).await {
            Ok(Some(ticket_type)) => {
                let sold = (ticket_type.quantity_sold - ticket.quantity.max(1)).max(0);
                if let Err(e) = store.set_ticket_type_sold(type_id, sold).await {
                    warn!(error = %e, %type_id, "failed to wind back ticket type sold count");
                }
            }
            Ok(None) => warn!(%type_id, "ticket references a missing ticket type"),
            Err(e) => warn!(error = %e, %type_id, "failed to load ticket type"),
        }
    }

    Ok(format!(
        "Your ticket for {} has been cancelled",
        ticket.event_title
    ))
}
