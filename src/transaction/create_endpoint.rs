//! The API endpoint for recording a new transaction.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use serde::Deserialize;

use crate::{
    AppState, Error, endpoints,
    transaction::{Ledger, codec},
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The transaction ledger.
    pub ledger: Arc<Mutex<Ledger>>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
        }
    }
}

/// The form data for creating or updating a transaction.
///
/// Fields arrive as raw strings and are validated by [codec::parse], so a
/// rejected form never touches the ledger.
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    /// The date of the transaction in the format YYYY-MM-DD.
    pub date: String,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The transaction category, e.g. "Income" or "Expense".
    pub category: String,
    /// The amount of money spent or earned.
    pub amount: String,
}

/// Route handler for recording a new transaction.
///
/// On success, responds with a redirect to the transactions page. On a
/// validation error, responds with an alert and leaves the ledger unchanged.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
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

    match ledger.add(transaction) {
        Ok(()) => (
            HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => error.into_alert_response(),
    }
}
