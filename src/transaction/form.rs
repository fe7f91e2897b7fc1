//! The shared form fields for creating and editing a transaction.

use maud::{Markup, html};
use time::Date;

use crate::html::{FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE};

/// The values a transaction form is prefilled with.
///
/// The create form leaves everything but the date empty; the edit form
/// prefills every field from the transaction being edited.
pub struct TransactionFormDefaults<'a> {
    pub date: Date,
    pub description: Option<&'a str>,
    pub category: Option<&'a str>,
    pub amount: Option<f64>,
}

pub fn transaction_form_fields(defaults: &TransactionFormDefaults<'_>) -> Markup {
    let amount_str = defaults.amount.map(|amount| format!("{amount:.2}"));
    let description_placeholder = defaults.description.unwrap_or("Description");

    html! {
        div
        {
            label
                for="date"
                class=(FORM_LABEL_STYLE)
            {
                "Date"
            }

            input
                name="date"
                id="date"
                type="date"
                value=(defaults.date)
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for="description"
                class=(FORM_LABEL_STYLE)
            {
                "Description"
            }

            input
                name="description"
                id="description"
                type="text"
                placeholder=(description_placeholder)
                value=[defaults.description]
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for="category"
                class=(FORM_LABEL_STYLE)
            {
                "Category"
            }

            input
                name="category"
                id="category"
                type="text"
                placeholder="Income/Expense"
                value=[defaults.category]
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for="amount"
                class=(FORM_LABEL_STYLE)
            {
                "Amount"
            }

            input
                name="amount"
                id="amount"
                type="number"
                step="0.01"
                placeholder="0.00"
                required
                value=[amount_str.as_deref()]
                class=(FORM_TEXT_INPUT_STYLE);
        }
    }
}
