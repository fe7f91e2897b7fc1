//! The API endpoint for deleting the transaction at a ledger position.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{AppState, Error, endpoints, transaction::Ledger};

/// The state needed to delete a transaction.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState {
    /// The transaction ledger.
    pub ledger: Arc<Mutex<Ledger>>,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
        }
    }
}

/// Route handler for deleting the transaction at `position`.
///
/// Later transactions shift down one position, so on success the client is
/// redirected to a fresh copy of the transactions page.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    Path(position): Path<usize>,
) -> Response {
    let mut ledger = match state
        .ledger
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire the ledger lock: {error}"))
    {
        Ok(ledger) => ledger,
        Err(_) => return Error::LedgerLockError.into_alert_response(),
    };

    match ledger.remove(position) {
        Ok(_) => (
            HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => error.into_alert_response(),
    }
}
