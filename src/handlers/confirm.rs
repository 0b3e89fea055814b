use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::models::registration::{RegistrationUpsert, PAYMENT_PAID};
use crate::payments::{PaymentProvider, SESSION_PAID};
use crate::state::AppState;
use crate::store::TicketStore;
use crate::utils::error::AppError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmRequest {
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ConfirmResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Outcome of a confirmation attempt. A session that has not settled yet is
/// an expected state the client polls on, not an error.
#[derive(Debug, PartialEq, Eq)]
pub enum ConfirmOutcome {
    Confirmed,
    AwaitingPayment(String),
}

pub async fn confirm_purchase_handler(
    State(state): State<AppState>,
    caller: AuthUser,
    body: Option<Json<ConfirmRequest>>,
) -> Result<Json<ConfirmResponse>, AppError> {
    let session_id = body
        .and_then(|Json(req)| req.session_id)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::ValidationError("sessionId is required".to_string()))?;

    let outcome = confirm_purchase(
        state.store.as_ref(),
        state.payments.as_ref(),
        &caller,
        &session_id,
    )
    .await?;

    Ok(Json(match outcome {
        ConfirmOutcome::Confirmed => ConfirmResponse {
            ok: true,
            status: None,
        },
        ConfirmOutcome::AwaitingPayment(status) => ConfirmResponse {
            ok: false,
            status: Some(status),
        },
    }))
}

/// Reflect a settled checkout session into the registration record and the
/// event's remaining-ticket counter.
///
/// The registration upsert is the authoritative side effect and the only
/// fatal write. The order update and the inventory decrement are best-effort:
/// their failures are logged and swallowed. Re-running the flow for a session
/// that already settled re-applies the (idempotent) upsert but skips the
/// decrement, so retries cannot drain inventory.
pub async fn confirm_purchase(
    store: &dyn TicketStore,
    payments: &dyn PaymentProvider,
    caller: &AuthUser,
    session_id: &str,
) -> Result<ConfirmOutcome, AppError> {
    let session = payments.retrieve_checkout_session(session_id).await?;

    let (Some(user_id), Some(event_id)) = (
        session.metadata.user_id.as_deref(),
        session.metadata.event_id.as_deref(),
    ) else {
        return Err(AppError::ValidationError(
            "Checkout session metadata is missing user or event".to_string(),
        ));
    };

    let user_id: Uuid = user_id.parse().map_err(|_| {
        AppError::ValidationError("Checkout session metadata is malformed".to_string())
    })?;
    let event_id: Uuid = event_id.parse().map_err(|_| {
        AppError::ValidationError("Checkout session metadata is malformed".to_string())
    })?;

    if user_id != caller.id {
        return Err(AppError::Forbidden(
            "Checkout session does not belong to the current user".to_string(),
        ));
    }

    if session.payment_status != SESSION_PAID {
        return Ok(ConfirmOutcome::AwaitingPayment(session.payment_status));
    }

    let quantity = session.metadata.quantity();

    match store
        .mark_order_paid(session_id, session.amount_total, session.currency.as_deref())
        .await
    {
        Ok(true) => {}
        Ok(false) => warn!(%session_id, "no ticket order found for session"),
        Err(e) => warn!(error = %e, %session_id, "failed to update ticket order"),
    }

    // A registration already settled by this same session means a retry:
    // the inventory was decremented the first time around.
    let already_settled = match store.fetch_registration(user_id, event_id).await {
        Ok(Some(reg)) => {
            reg.payment_status == PAYMENT_PAID
                && reg.stripe_session_id.as_deref() == Some(session_id)
        }
        Ok(None) => false,
        Err(e) => {
            warn!(error = %e, %user_id, %event_id, "failed to read existing registration");
            false
        }
    };

    store
        .upsert_registration(&RegistrationUpsert {
            user_id,
            event_id,
            quantity,
            stripe_session_id: session_id.to_string(),
        })
        .await?;

    if !already_settled {
        match store.fetch_event(event_id).await {
            Ok(Some(event)) => {
                if let Some(available) = event.available_tickets {
                    if available > 0 {
                        let remaining = (available - quantity).max(0);
                        if let Err(e) = store.set_available_tickets(event_id, remaining).await {
                            warn!(error = %e, %event_id, "failed to update remaining tickets");
                        }
                    }
                }
            }
            Ok(None) => warn!(%event_id, "event not found while updating remaining tickets"),
            Err(e) => warn!(error = %e, %event_id, "failed to load event for inventory update"),
        }
    }

    Ok(ConfirmOutcome::Confirmed)
}
