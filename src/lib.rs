//! Pocketbook is a web app for recording personal financial transactions in
//! a CSV ledger file.
//!
//! The library serves HTML pages directly: a table of all transactions plus
//! forms for adding, editing and deleting them. Transactions are addressed
//! by their position in the ledger, which is also the row order of the
//! backing file.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod endpoints;
mod html;
mod internal_server_error;
mod navigation;
mod not_found;
mod routing;
mod transaction;

pub use app_state::AppState;
pub use routing::build_router;
pub use transaction::{Ledger, Transaction};

use crate::{
    alert::AlertTemplate,
    html::render,
    internal_server_error::{InternalServerErrorPageTemplate, render_internal_server_error},
    not_found::get_404_not_found_response,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The user supplied a date that is not a calendar date in the format
    /// `YYYY-MM-DD`.
    ///
    /// The mutation is rejected before any state change, so the ledger and
    /// its backing file are untouched.
    #[error("\"{0}\" is not a date in the format YYYY-MM-DD")]
    InvalidDate(String),

    /// The user supplied an amount that cannot be parsed as a decimal number.
    #[error("\"{0}\" is not a decimal number")]
    InvalidAmount(String),

    /// The supplied position does not address a transaction in the ledger.
    ///
    /// Positions shift after deletions, so a stale page can produce this
    /// error. The mutation is a no-op.
    #[error("position {position} is out of range for a ledger of {length} transactions")]
    PositionOutOfRange {
        /// The position the caller asked for.
        position: usize,
        /// The number of transactions in the ledger at the time of the call.
        length: usize,
    },

    /// The ledger file exists but its header row is not the expected schema.
    ///
    /// This is surfaced at load time instead of falling back to an empty
    /// ledger, which would mask data loss.
    #[error("the ledger file has the header \"{found}\", want \"{want}\"")]
    UnrecognizedSchema {
        /// The header row found in the file.
        found: String,
        /// The header row the ledger expects.
        want: String,
    },

    /// A row of the ledger file could not be parsed as a transaction.
    #[error("could not parse line {line} of the ledger file: {message}")]
    MalformedRecord {
        /// The 1-based line number of the offending row.
        line: usize,
        /// What was wrong with the row.
        message: String,
    },

    /// The ledger file could not be read or written.
    #[error("could not access the ledger file: {0}")]
    Io(String),

    /// Could not acquire the ledger lock.
    #[error("could not acquire the ledger lock")]
    LedgerLockError,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::PositionOutOfRange { .. } => get_404_not_found_response(),
            Error::LedgerLockError => render_internal_server_error(Default::default()),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                render_internal_server_error(InternalServerErrorPageTemplate::default())
            }
        }
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        match self {
            Error::InvalidDate(raw_date) => render(
                StatusCode::BAD_REQUEST,
                AlertTemplate::error(
                    "Invalid date",
                    &format!("\"{raw_date}\" is not a date in the format YYYY-MM-DD."),
                )
                .into_markup(),
            ),
            Error::InvalidAmount(raw_amount) => render(
                StatusCode::BAD_REQUEST,
                AlertTemplate::error(
                    "Invalid amount",
                    &format!("\"{raw_amount}\" is not a decimal number."),
                )
                .into_markup(),
            ),
            Error::PositionOutOfRange { .. } => render(
                StatusCode::NOT_FOUND,
                AlertTemplate::error(
                    "Transaction not found",
                    "The transaction could not be found. Positions shift after \
                    deletions, so refresh the page and try again.",
                )
                .into_markup(),
            ),
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                render(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    AlertTemplate::error(
                        "Something went wrong",
                        "An unexpected error occurred, check the server logs for more details.",
                    )
                    .into_markup(),
                )
            }
        }
    }
}
