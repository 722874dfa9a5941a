//! Ledgerly is a web app for tracking personal income and expenses.
//!
//! This library provides an HTTP server that directly serves HTML pages: a
//! transaction list with search and category filtering, running totals, a
//! per-category expense chart, and forms for adding and editing entries.
//! The whole collection is persisted as a single JSON ledger file.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod aggregation;
mod alert;
mod app_state;
mod category;
mod chart;
mod endpoints;
mod html;
mod ledger;
mod navigation;
mod not_found;
mod routing;
mod timezone;
mod transaction;

pub use app_state::AppState;
pub use category::Category;
pub use ledger::{Ledger, LedgerFile, Transaction, TransactionDraft, TransactionId};
pub use routing::build_router;

use crate::{
    alert::Alert,
    not_found::get_404_not_found_response,
    routing::render_internal_server_error,
};

/// An async task that waits for either the ctrl+c or terminate signal,
/// whichever comes first, and then signals the server to shut down
/// gracefully.
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
    /// A transaction draft was submitted without a category.
    ///
    /// Description, amount and date are stored as given; the category is
    /// the only field the ledger insists on.
    #[error("a category is required")]
    MissingCategory,

    /// The category name does not belong to the fixed category set.
    #[error("\"{0}\" is not a known category")]
    UnknownCategory(String),

    /// The requested transaction could not be found.
    #[error("the requested resource could not be found")]
    NotFound,

    /// The ledger file could not be written after a mutation.
    #[error("could not write the ledger file: {0}")]
    LedgerWrite(String),

    /// Could not acquire the ledger lock.
    #[error("could not acquire the ledger lock")]
    LedgerLock,

    /// An error occurred while getting the local timezone from a canonical
    /// timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::InvalidTimezone(timezone) => render_internal_server_error(
                "Invalid Timezone Settings",
                &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to a valid, canonical timezone string."
                ),
            ),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                render_internal_server_error(
                    "Sorry, something went wrong.",
                    "Try again later or check the server logs.",
                )
            }
        }
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        match self {
            Error::MissingCategory => Alert::error(
                "Please select a category",
                "Transactions must be filed under a category before they can be saved.",
            )
            .into_response(StatusCode::BAD_REQUEST),
            Error::NotFound => Alert::error(
                "Could not find transaction",
                "Try refreshing the page to see if the transaction has already been deleted.",
            )
            .into_response(StatusCode::NOT_FOUND),
            Error::LedgerWrite(_) => Alert::error(
                "Could not save your changes",
                "The ledger file could not be written. Try again or check the server logs.",
            )
            .into_response(StatusCode::INTERNAL_SERVER_ERROR),
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                Alert::error(
                    "Something went wrong",
                    "An unexpected error occurred, check the server logs for more details.",
                )
                .into_response(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}
