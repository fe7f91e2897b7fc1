//! The 404 not found page.

use axum::{http::StatusCode, response::Response};
use maud::html;

use crate::{
    endpoints,
    html::{LINK_STYLE, PAGE_CONTAINER_STYLE, base, render},
};

/// The fallback route handler for requests that match no other route.
pub async fn get_404_not_found() -> Response {
    get_404_not_found_response()
}

/// Get a 404 response displaying the not found page.
pub fn get_404_not_found_response() -> Response {
    let content = html! {
        div class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-4xl font-bold" { "404" }
            p class="py-4" { "Sorry, the page or transaction you are looking for does not exist." }
            a href=(endpoints::TRANSACTIONS_VIEW) class=(LINK_STYLE) { "Back to transactions" }
        }
    };

    render(StatusCode::NOT_FOUND, base("Not Found", &content))
}
