//! The 500 internal server error page.

use axum::{http::StatusCode, response::Response};
use maud::html;

use crate::{
    endpoints,
    html::{LINK_STYLE, PAGE_CONTAINER_STYLE, base, render},
};

/// The description and suggested fix shown on the error page.
pub struct InternalServerErrorPageTemplate<'a> {
    pub description: &'a str,
    pub fix: &'a str,
}

impl Default for InternalServerErrorPageTemplate<'_> {
    fn default() -> Self {
        Self {
            description: "Sorry, something went wrong.",
            fix: "Try again later or check the server logs",
        }
    }
}

/// The route handler for the internal server error page.
pub async fn get_internal_server_error_page() -> Response {
    render_internal_server_error(Default::default())
}

/// Get a 500 response displaying the error page.
pub fn render_internal_server_error(template: InternalServerErrorPageTemplate) -> Response {
    let content = html! {
        div class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-4xl font-bold" { "500" }
            p class="py-4" { (template.description) }
            p class="pb-4" { (template.fix) }
            a href=(endpoints::TRANSACTIONS_VIEW) class=(LINK_STYLE) { "Back to transactions" }
        }
    };

    render(
        StatusCode::INTERNAL_SERVER_ERROR,
        base("Error", &content),
    )
}
