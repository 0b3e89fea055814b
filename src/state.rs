use std::sync::Arc;

use crate::auth::Authenticator;
use crate::payments::PaymentProvider;
use crate::store::TicketStore;

/// Shared per-request context. Handlers receive everything they touch
/// through this state rather than through process-wide globals.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TicketStore>,
    pub payments: Arc<dyn PaymentProvider>,
    pub auth: Arc<dyn Authenticator>,
}
