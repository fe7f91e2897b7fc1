//! The page that lists every transaction in the ledger.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::Response,
};
use maud::{Markup, html};
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    AppState, Error, endpoints,
    html::{
        BUTTON_DELETE_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, format_currency, render,
    },
    navigation::NavBar,
    transaction::{Ledger, Transaction},
};

/// The state needed to display the transactions page.
#[derive(Debug, Clone)]
pub struct TransactionsViewState {
    /// The transaction ledger.
    pub ledger: Arc<Mutex<Ledger>>,
}

impl FromRef<AppState> for TransactionsViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
        }
    }
}

/// Descriptions longer than this many graphemes are truncated in the table.
const MAX_DESCRIPTION_LENGTH: usize = 40;

/// Route handler for displaying the transactions page.
pub async fn get_transactions_page(
    State(state): State<TransactionsViewState>,
) -> Result<Response, Error> {
    let transactions = state
        .ledger
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire the ledger lock: {error}"))
        .map_err(|_| Error::LedgerLockError)?
        .transactions()
        .to_vec();

    Ok(render(
        StatusCode::OK,
        base("Transactions", &transactions_view(&transactions)),
    ))
}

fn transactions_view(transactions: &[Transaction]) -> Markup {
    html! {
        (NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html())

        div class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-2xl font-bold pb-4" { "Transactions" }

            @if transactions.is_empty() {
                p class="py-4" { "No transactions to display." }
                a href=(endpoints::NEW_TRANSACTION_VIEW) class=(LINK_STYLE)
                {
                    "Record your first transaction"
                }
            } @else {
                table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                            th scope="col" class=(TABLE_CELL_STYLE) {
                                span class="sr-only" { "Actions" }
                            }
                        }
                    }

                    tbody
                    {
                        @for (position, transaction) in transactions.iter().enumerate() {
                            (transaction_row(position, transaction))
                        }
                    }
                }
            }
        }
    }
}

fn transaction_row(position: usize, transaction: &Transaction) -> Markup {
    let amount_style = if transaction.amount < 0.0 {
        "text-red-600 dark:text-red-500"
    } else {
        "text-green-600 dark:text-green-500"
    };

    html! {
        tr class=(TABLE_ROW_STYLE)
        {
            td class=(TABLE_CELL_STYLE) { (transaction.date) }
            td class=(TABLE_CELL_STYLE) { (truncate_description(&transaction.description)) }
            td class=(TABLE_CELL_STYLE) { (transaction.category) }
            td class={ (TABLE_CELL_STYLE) " " (amount_style) }
            {
                (format_currency(transaction.amount))
            }
            td class=(TABLE_CELL_STYLE)
            {
                a
                    href=(endpoints::format_endpoint(endpoints::EDIT_TRANSACTION_VIEW, position))
                    class=(LINK_STYLE)
                {
                    "Edit"
                }
                " "
                button
                    hx-delete=(endpoints::format_endpoint(endpoints::DELETE_TRANSACTION, position))
                    hx-target-error="#alert-container"
                    class=(BUTTON_DELETE_STYLE)
                {
                    "Delete"
                }
            }
        }
    }
}

/// Truncate `description` to at most [MAX_DESCRIPTION_LENGTH] graphemes.
fn truncate_description(description: &str) -> String {
    if description.graphemes(true).count() <= MAX_DESCRIPTION_LENGTH {
        return description.to_owned();
    }

    let truncated = description
        .graphemes(true)
        .take(MAX_DESCRIPTION_LENGTH - 3)
        .collect::<String>();

    format!("{truncated}...")
}

#[cfg(test)]
mod transactions_page_tests {
    use std::sync::{Arc, Mutex};

    use axum::{body::Body, extract::State, http::StatusCode, response::Response};
    use scraper::{Html, Selector};
    use tempfile::{TempDir, tempdir};

    use crate::{
        endpoints,
        transaction::{Ledger, codec},
    };

    use super::{TransactionsViewState, get_transactions_page, truncate_description};

    #[tokio::test]
    async fn page_shows_empty_state_when_ledger_is_empty() {
        let (_directory, state) = new_state(&[]);

        let response = get_transactions_page(State(state)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let document = parse_response_body(response).await;
        let text = document.root_element().text().collect::<String>();
        assert!(
            text.contains("No transactions to display."),
            "want empty state message, got {text:?}"
        );
    }

    #[tokio::test]
    async fn page_lists_transactions_in_ledger_order() {
        let (_directory, state) = new_state(&[
            ("2024-01-05", "Salary", "income", "1000.00"),
            ("2024-01-06", "Coffee", "expense", "-4.50"),
        ]);

        let response = get_transactions_page(State(state)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let document = parse_response_body(response).await;
        let row_selector = Selector::parse("tbody tr").unwrap();
        let rows = document.select(&row_selector).collect::<Vec<_>>();
        assert_eq!(rows.len(), 2, "want 2 table rows, got {}", rows.len());

        let first_row = rows[0].text().collect::<String>();
        assert!(first_row.contains("2024-01-05"), "got row {first_row:?}");
        assert!(first_row.contains("Salary"), "got row {first_row:?}");
        assert!(first_row.contains("Income"), "got row {first_row:?}");
        assert!(first_row.contains("$1,000.00"), "got row {first_row:?}");

        let second_row = rows[1].text().collect::<String>();
        assert!(second_row.contains("Coffee"), "got row {second_row:?}");
        assert!(second_row.contains("-$4.50"), "got row {second_row:?}");
    }

    #[tokio::test]
    async fn rows_link_to_edit_and_delete_by_position() {
        let (_directory, state) = new_state(&[
            ("2024-01-05", "Salary", "income", "1000.00"),
            ("2024-01-06", "Coffee", "expense", "-4.50"),
        ]);

        let response = get_transactions_page(State(state)).await.unwrap();
        let document = parse_response_body(response).await;

        let edit_selector = Selector::parse("tbody a").unwrap();
        let edit_hrefs = document
            .select(&edit_selector)
            .filter_map(|link| link.value().attr("href"))
            .collect::<Vec<_>>();
        assert_eq!(edit_hrefs, vec!["/transactions/0/edit", "/transactions/1/edit"]);

        let delete_selector = Selector::parse("tbody button[hx-delete]").unwrap();
        let delete_targets = document
            .select(&delete_selector)
            .filter_map(|button| button.value().attr("hx-delete"))
            .collect::<Vec<_>>();
        assert_eq!(delete_targets, vec!["/api/transactions/0", "/api/transactions/1"]);
    }

    #[test]
    fn short_descriptions_are_not_truncated() {
        assert_eq!(truncate_description("Coffee"), "Coffee");
    }

    #[test]
    fn long_descriptions_are_truncated_with_an_ellipsis() {
        let description = "a".repeat(50);
        let truncated = truncate_description(&description);

        assert_eq!(truncated.len(), 40);
        assert!(truncated.ends_with("..."), "got {truncated:?}");
    }

    #[tokio::test]
    async fn page_has_a_link_to_the_new_transaction_page() {
        let (_directory, state) = new_state(&[]);

        let response = get_transactions_page(State(state)).await.unwrap();
        let document = parse_response_body(response).await;

        let link_selector = Selector::parse("a").unwrap();
        let hrefs = document
            .select(&link_selector)
            .filter_map(|link| link.value().attr("href"))
            .collect::<Vec<_>>();
        assert!(
            hrefs.contains(&endpoints::NEW_TRANSACTION_VIEW),
            "want a link to {}, got {hrefs:?}",
            endpoints::NEW_TRANSACTION_VIEW
        );
    }

    fn new_state(
        raw_transactions: &[(&str, &str, &str, &str)],
    ) -> (TempDir, TransactionsViewState) {
        let temp_dir = tempdir().unwrap();
        let mut ledger = Ledger::load(temp_dir.path().join("transactions.csv")).unwrap();

        for (date, description, category, amount) in raw_transactions {
            let transaction = codec::parse(date, description, category, amount).unwrap();
            ledger.add(transaction).unwrap();
        }

        let state = TransactionsViewState {
            ledger: Arc::new(Mutex::new(ledger)),
        };

        (temp_dir, state)
    }

    async fn parse_response_body(response: Response<Body>) -> Html {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        Html::parse_document(&String::from_utf8_lossy(&body))
    }
}
