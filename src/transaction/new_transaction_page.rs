//! The page with the form for recording a new transaction.

use axum::{http::StatusCode, response::Response};
use maud::html;
use time::OffsetDateTime;

use crate::{
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, base, render},
    navigation::NavBar,
    transaction::form::{TransactionFormDefaults, transaction_form_fields},
};

/// Route handler for displaying the new transaction page.
pub async fn get_new_transaction_page() -> Response {
    let defaults = TransactionFormDefaults {
        date: OffsetDateTime::now_utc().date(),
        description: None,
        category: None,
        amount: None,
    };

    let content = html! {
        (NavBar::new(endpoints::NEW_TRANSACTION_VIEW).into_html())

        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-2xl font-bold pb-4" { "New Transaction" }

            form
                hx-post=(endpoints::TRANSACTIONS_API)
                hx-target-error="#alert-container"
                class="space-y-4 w-full"
            {
                (transaction_form_fields(&defaults))

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Save" }
            }
        }
    };

    render(StatusCode::OK, base("New Transaction", &content))
}
