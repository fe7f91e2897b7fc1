//! The page with the form for editing an existing transaction.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::Response,
};
use maud::html;

use crate::{
    AppState, Error, endpoints,
    html::{BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, base, render},
    navigation::NavBar,
    transaction::{
        Ledger, Transaction,
        form::{TransactionFormDefaults, transaction_form_fields},
    },
};

/// The state needed to display the edit transaction page.
#[derive(Debug, Clone)]
pub struct EditTransactionViewState {
    /// The transaction ledger.
    pub ledger: Arc<Mutex<Ledger>>,
}

impl FromRef<AppState> for EditTransactionViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
        }
    }
}

/// Route handler for displaying the edit transaction page.
///
/// Responds with a 404 page when `position` does not address a transaction.
pub async fn get_edit_transaction_page(
    State(state): State<EditTransactionViewState>,
    Path(position): Path<usize>,
) -> Result<Response, Error> {
    let ledger = state
        .ledger
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire the ledger lock: {error}"))
        .map_err(|_| Error::LedgerLockError)?;

    let transaction = ledger
        .get(position)
        .ok_or(Error::PositionOutOfRange {
            position,
            length: ledger.len(),
        })?
        .clone();

    drop(ledger);

    Ok(render(
        StatusCode::OK,
        base("Edit Transaction", &edit_transaction_view(position, &transaction)),
    ))
}

fn edit_transaction_view(position: usize, transaction: &Transaction) -> maud::Markup {
    let defaults = TransactionFormDefaults {
        date: transaction.date,
        description: Some(&transaction.description),
        category: Some(&transaction.category),
        amount: Some(transaction.amount),
    };

    html! {
        (NavBar::new(endpoints::EDIT_TRANSACTION_VIEW).into_html())

        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-2xl font-bold pb-4" { "Edit Transaction" }

            form
                hx-put=(endpoints::format_endpoint(endpoints::EDIT_TRANSACTION_VIEW, position))
                hx-target-error="#alert-container"
                class="space-y-4 w-full"
            {
                (transaction_form_fields(&defaults))

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Save" }
            }
        }
    }
}

#[cfg(test)]
mod edit_page_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, State},
        http::StatusCode,
        response::IntoResponse,
    };
    use scraper::{Html, Selector};
    use tempfile::{TempDir, tempdir};

    use crate::transaction::{Ledger, codec};

    use super::{EditTransactionViewState, get_edit_transaction_page};

    #[tokio::test]
    async fn form_is_prefilled_with_the_transaction() {
        let (_directory, state) = new_state(&[
            ("2024-01-05", "Salary", "income", "1000.00"),
            ("2024-01-06", "Coffee", "expense", "-4.50"),
        ]);

        let response = get_edit_transaction_page(State(state), Path(1))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let document = Html::parse_document(&String::from_utf8_lossy(&body));

        assert_input_value(&document, "date", "2024-01-06");
        assert_input_value(&document, "description", "Coffee");
        assert_input_value(&document, "category", "Expense");
        assert_input_value(&document, "amount", "-4.50");

        let form_selector = Selector::parse("form").unwrap();
        let form = document.select(&form_selector).next().unwrap();
        assert_eq!(form.value().attr("hx-put"), Some("/transactions/1/edit"));
    }

    #[tokio::test]
    async fn out_of_range_position_responds_with_404() {
        let (_directory, state) = new_state(&[("2024-01-05", "Salary", "income", "1000.00")]);

        let response = get_edit_transaction_page(State(state), Path(1))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    fn new_state(
        raw_transactions: &[(&str, &str, &str, &str)],
    ) -> (TempDir, EditTransactionViewState) {
        let temp_dir = tempdir().unwrap();
        let mut ledger = Ledger::load(temp_dir.path().join("transactions.csv")).unwrap();

        for (date, description, category, amount) in raw_transactions {
            let transaction = codec::parse(date, description, category, amount).unwrap();
            ledger.add(transaction).unwrap();
        }

        let state = EditTransactionViewState {
            ledger: Arc::new(Mutex::new(ledger)),
        };

        (temp_dir, state)
    }

    #[track_caller]
    fn assert_input_value(document: &Html, name: &str, expected_value: &str) {
        let selector_string = format!("input[name={name}]");
        let selector = Selector::parse(&selector_string).unwrap();
        let value = document
            .select(&selector)
            .next()
            .unwrap_or_else(|| panic!("want an input named {name}"))
            .value()
            .attr("value");

        assert_eq!(
            value,
            Some(expected_value),
            "want {name} input with value=\"{expected_value}\", got {value:?}"
        );
    }
}
