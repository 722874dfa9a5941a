//! Defines the endpoint for updating an existing transaction.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, Query, State},
    response::Response,
};
use axum_extra::extract::Form;

use crate::{
    AppState, Error,
    ledger::{Ledger, TransactionId},
    transaction::{RedirectQuery, TransactionForm},
};

/// The state needed to update a transaction.
#[derive(Debug, Clone)]
pub struct EditTransactionState {
    /// The transaction ledger.
    pub ledger: Arc<Mutex<Ledger>>,
}

impl FromRef<AppState> for EditTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
        }
    }
}

/// A route handler for updating a transaction, redirects back to the
/// transactions view on success.
///
/// Updating an id that no longer exists is logged but otherwise treated
/// like a success: the record was most likely deleted in another tab, and
/// the redirect shows the user the current state either way.
pub async fn edit_transaction_endpoint(
    State(state): State<EditTransactionState>,
    Path(transaction_id): Path<TransactionId>,
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

    match ledger.update(transaction_id, form.into_draft()) {
        Ok(_) => {}
        Err(Error::NotFound) => {
            tracing::warn!("ignored update for missing transaction {transaction_id}");
        }
        Err(error) => {
            tracing::error!("could not update transaction {transaction_id}: {error}");
            return error.into_alert_response();
        }
    }

    drop(ledger);

    query.redirect_response()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, Query, State},
        http::{HeaderValue, StatusCode},
    };
    use axum_extra::extract::Form;
    use axum_htmx::HX_REDIRECT;
    use time::macros::date;

    use crate::{
        category::Category,
        ledger::{Ledger, LedgerFile, Transaction, TransactionDraft},
    };

    use super::{EditTransactionState, edit_transaction_endpoint};
    use crate::transaction::{RedirectQuery, TransactionForm};

    fn test_state_with_transaction() -> (EditTransactionState, Transaction, tempfile::TempDir) {
        let dir = tempfile::tempdir().expect("could not create temp dir");
        let mut ledger = Ledger::open(LedgerFile::new(dir.path().join("transactions.json")));
        let transaction = ledger
            .add(TransactionDraft {
                description: "Rentt".to_owned(),
                amount: -900.0,
                category: Some(Category::Other),
                date: date!(2025 - 11 - 01),
            })
            .expect("could not create test transaction");

        (
            EditTransactionState {
                ledger: Arc::new(Mutex::new(ledger)),
            },
            transaction,
            dir,
        )
    }

    #[tokio::test]
    async fn can_update_transaction() {
        let (state, transaction, _dir) = test_state_with_transaction();
        let redirect_url = "/transactions?search=rent".to_owned();
        let form = TransactionForm {
            description: "Rent".to_owned(),
            amount: -950.0,
            category: Some(Category::Housing),
            date: date!(2025 - 11 - 02),
        };

        let response = edit_transaction_endpoint(
            State(state.clone()),
            Path(transaction.id),
            Query(RedirectQuery {
                redirect_url: Some(redirect_url.clone()),
            }),
            Form(form),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(HX_REDIRECT),
            Some(&HeaderValue::from_str(&redirect_url).unwrap())
        );

        let ledger = state.ledger.lock().unwrap();
        let updated = ledger
            .find_by_id(transaction.id)
            .expect("could not get test transaction");
        assert_eq!(updated.id, transaction.id);
        assert_eq!(updated.description, "Rent");
        assert_eq!(updated.amount, -950.0);
        assert_eq!(updated.category, Category::Housing);
        assert_eq!(updated.date, date!(2025 - 11 - 02));
    }

    #[tokio::test]
    async fn updating_a_missing_id_redirects_and_changes_nothing() {
        let (state, transaction, _dir) = test_state_with_transaction();
        let form = TransactionForm {
            description: "Nope".to_owned(),
            amount: 1.0,
            category: Some(Category::Other),
            date: date!(2025 - 11 - 02),
        };

        let response = edit_transaction_endpoint(
            State(state.clone()),
            Path(transaction.id + 1),
            Query(RedirectQuery::default()),
            Form(form),
        )
        .await;

        // The missing id is deliberately not surfaced to the user.
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let ledger = state.ledger.lock().unwrap();
        assert_eq!(ledger.all(), [transaction]);
    }

    #[tokio::test]
    async fn missing_category_responds_with_alert_and_changes_nothing() {
        let (state, transaction, _dir) = test_state_with_transaction();
        let form = TransactionForm {
            description: "Rent".to_owned(),
            amount: -950.0,
            category: None,
            date: date!(2025 - 11 - 02),
        };

        let response = edit_transaction_endpoint(
            State(state.clone()),
            Path(transaction.id),
            Query(RedirectQuery::default()),
            Form(form),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let ledger = state.ledger.lock().unwrap();
        assert_eq!(ledger.all(), [transaction]);
    }
}
