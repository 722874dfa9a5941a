//! Defines the route handler for the edit transaction page.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::Markup;

use crate::{
    AppState, Error,
    endpoints::{self, format_endpoint},
    html::{BUTTON_PRIMARY_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, base, dollar_input_styles},
    ledger::{Ledger, TransactionId},
    navigation::nav_bar,
    not_found::get_404_not_found_response,
    transaction::{
        RedirectQuery, build_redirect_param,
        form::{TransactionFormDefaults, transaction_form_fields},
    },
};

/// The state needed for the edit transaction page.
#[derive(Debug, Clone)]
pub struct EditTransactionPageState {
    /// The transaction ledger.
    pub ledger: Arc<Mutex<Ledger>>,
}

impl FromRef<AppState> for EditTransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
        }
    }
}

/// Renders the page for editing a transaction.
///
/// The form fields are pre-populated from the stored record; submitting
/// puts the changes back to this page's path and lands on the transactions
/// view. Opening the edit page for another record simply switches the edit
/// target; nothing is tracked between navigations.
pub async fn get_edit_transaction_page(
    State(state): State<EditTransactionPageState>,
    Path(transaction_id): Path<TransactionId>,
    Query(query): Query<RedirectQuery>,
) -> Response {
    let ledger = match state.ledger.lock() {
        Ok(ledger) => ledger,
        Err(error) => {
            tracing::error!("could not acquire ledger lock: {error}");
            return Error::LedgerLock.into_response();
        }
    };

    let Some(transaction) = ledger.find_by_id(transaction_id) else {
        return get_404_not_found_response();
    };

    let markup = edit_transaction_view(
        transaction_id,
        &TransactionFormDefaults::from_transaction(transaction),
        query.redirect_url.as_deref(),
    );

    drop(ledger);

    (StatusCode::OK, markup).into_response()
}

fn edit_transaction_view(
    transaction_id: TransactionId,
    defaults: &TransactionFormDefaults<'_>,
    redirect_url: Option<&str>,
) -> Markup {
    let mut edit_endpoint = format_endpoint(endpoints::EDIT_TRANSACTION_VIEW, transaction_id);
    if let Some(redirect_param) = redirect_url.and_then(build_redirect_param) {
        edit_endpoint = format!("{edit_endpoint}?{redirect_param}");
    }

    let cancel_url = redirect_url.unwrap_or(endpoints::TRANSACTIONS_VIEW);

    let content = maud::html!(
        (nav_bar(endpoints::TRANSACTIONS_VIEW))

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full max-w-md bg-white dark:bg-gray-800 rounded-lg shadow p-6"
            {
                h1 class="text-xl font-bold mb-4" { "Edit transaction" }

                form
                    hx-put=(edit_endpoint)
                    hx-target-error="#alert-container"
                    hx-swap="outerHTML"
                    class="space-y-4"
                {
                    (transaction_form_fields(defaults))

                    button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Update" }

                    p class="text-center"
                    {
                        a href=(cancel_url) class=(LINK_STYLE) { "Cancel" }
                    }
                }
            }
        }
    );

    base("Edit Transaction", &[dollar_input_styles()], &content)
}
