//! Alert partials for displaying error messages to users.
//!
//! Alerts are swapped out-of-band into the `#alert-container` element that
//! the base layout places on every page, so an endpoint can answer an HTMX
//! form post with an alert without re-rendering the page.

use maud::{Markup, html};

/// Renders an error alert message
pub struct AlertTemplate<'a> {
    pub message: &'a str,
    pub details: &'a str,
}

impl<'a> AlertTemplate<'a> {
    /// Create a new error alert
    pub fn error(message: &'a str, details: &'a str) -> Self {
        Self { message, details }
    }

    pub fn into_markup(self) -> Markup {
        let container_style = "p-4 text-sm rounded-lg shadow-lg text-red-800 bg-red-50 \
            dark:bg-gray-800 dark:text-red-400";

        html! {
            div hx-swap-oob="innerHTML:#alert-container"
            {
                div class=(container_style) role="alert"
                {
                    span class="font-medium" { (self.message) }

                    @if !self.details.is_empty() {
                        " " (self.details)
                    }
                }
            }
        }
    }
}
