//! Defines the endpoint for creating a new transaction.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None
// instead of failing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, Error,
    category::Category,
    endpoints,
    ledger::{Ledger, TransactionDraft},
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

/// The form data for creating or editing a transaction.
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    /// Text detailing the transaction. May be empty.
    #[serde(default)]
    pub description: String,
    /// The signed value of the transaction in dollars. Positive amounts are
    /// income, negative amounts are expenses.
    pub amount: f64,
    /// The category to file the transaction under. The ledger rejects
    /// drafts where this is missing.
    #[serde(default)]
    pub category: Option<Category>,
    /// The date when the transaction occurred.
    pub date: Date,
}

impl TransactionForm {
    /// Convert the raw form values into a draft for the ledger.
    pub fn into_draft(self) -> TransactionDraft {
        TransactionDraft {
            description: self.description,
            amount: self.amount,
            category: self.category,
            date: self.date,
        }
    }
}

/// The query parameters for the mutating transaction endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct RedirectQuery {
    /// Where to send the client on success. Defaults to the transactions
    /// view, and is used to land back on a filtered view after an edit or
    /// delete started from one.
    pub redirect_url: Option<String>,
}

impl RedirectQuery {
    /// The redirect response the mutating endpoints finish with.
    pub fn redirect_response(self) -> Response {
        let redirect_url = self
            .redirect_url
            .unwrap_or_else(|| endpoints::TRANSACTIONS_VIEW.to_owned());

        (HxRedirect(redirect_url), StatusCode::SEE_OTHER).into_response()
    }
}

/// A route handler for creating a new transaction, redirects back to the
/// transactions view on success.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Query(query): Query<RedirectQuery>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let mut ledger = match state.ledger.lock() {
        Ok(ledger) => ledger,
        Err(error) => {
            tracing::error!("could not acquire ledger lock: {error}");
            return Error::LedgerLock.into_alert_response();
        }
    };

    if let Err(error) = ledger.add(form.into_draft()) {
        tracing::error!("could not create transaction: {error}");
        return error.into_alert_response();
    }

    drop(ledger);

    query.redirect_response()
}
