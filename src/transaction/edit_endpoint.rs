//! The API endpoint for updating the transaction at a ledger position.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;

use crate::{
    AppState, Error, endpoints,
    transaction::{Ledger, codec, create_endpoint::TransactionForm},
};

/// The state needed to update a transaction.
#[derive(Debug, Clone)]
pub struct EditTransactionState {
    /// The transaction ledger.
    pub ledger: Arc<Mutex<Ledger>>,
}

impl FromRef<AppState> for EditTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
        }
    }
}

/// Route handler for replacing the transaction at `position`.
///
/// On success, responds with a redirect to the transactions page. On a
/// validation error or an out of range position, responds with an alert and
/// leaves the ledger unchanged.
pub async fn edit_transaction_endpoint(
    State(state): State<EditTransactionState>,
    Path(position): Path<usize>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let transaction =
        match codec::parse(&form.date, &form.description, &form.category, &form.amount) {
            Ok(transaction) => transaction,
            Err(error) => return error.into_alert_response(),
        };

    let mut ledger = match state
        .ledger
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire the ledger lock: {error}"))
    {
        Ok(ledger) => ledger,
        Err(_) => return Error::LedgerLockError.into_alert_response(),
    };

    match ledger.update(position, transaction) {
        Ok(()) => (
            HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => error.into_alert_response(),
    }
}
