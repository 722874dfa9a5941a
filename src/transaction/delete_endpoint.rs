//! Defines the endpoint for deleting a transaction.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, Query, State},
    response::Response,
};

use crate::{
    AppState, Error,
    ledger::{Ledger, TransactionId},
    transaction::RedirectQuery,
};

/// The state needed to delete a transaction.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState {
    /// The transaction ledger.
    pub ledger: Arc<Mutex<Ledger>>,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
        }
    }
}

/// A route handler for deleting a transaction, redirects back to the
/// transactions view.
///
/// Deleting an id that is already gone responds exactly like a successful
/// delete, so repeated clicks and stale pages are harmless.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    Path(transaction_id): Path<TransactionId>,
    Query(query): Query<RedirectQuery>,
) -> Response {
    let mut ledger = match state.ledger.lock() {
        Ok(ledger) => ledger,
        Err(error) => {
            tracing::error!("could not acquire ledger lock: {error}");
            return Error::LedgerLock.into_alert_response();
        }
    };

    if let Err(error) = ledger.remove(transaction_id) {
        tracing::error!("could not delete transaction {transaction_id}: {error}");
        return error.into_alert_response();
    }

    drop(ledger);

    query.redirect_response()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, Query, State},
        http::StatusCode,
    };
    use time::macros::date;

    use crate::{
        category::Category,
        ledger::{Ledger, LedgerFile, TransactionDraft},
        transaction::RedirectQuery,
    };

    use super::{DeleteTransactionState, delete_transaction_endpoint};

    fn test_state() -> (DeleteTransactionState, tempfile::TempDir) {
        let dir = tempfile::tempdir().expect("could not create temp dir");
        let ledger = Ledger::open(LedgerFile::new(dir.path().join("transactions.json")));

        (
            DeleteTransactionState {
                ledger: Arc::new(Mutex::new(ledger)),
            },
            dir,
        )
    }

    fn draft(description: &str, amount: f64) -> TransactionDraft {
        TransactionDraft {
            description: description.to_owned(),
            amount,
            category: Some(Category::Food),
            date: date!(2025 - 11 - 02),
        }
    }

    #[tokio::test]
    async fn deletes_the_transaction() {
        let (state, _dir) = test_state();
        let transaction = state
            .ledger
            .lock()
            .unwrap()
            .add(draft("Groceries", -42.5))
            .expect("could not create test transaction");

        let response = delete_transaction_endpoint(
            State(state.clone()),
            Path(transaction.id),
            Query(RedirectQuery::default()),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(state.ledger.lock().unwrap().all().is_empty());
    }

    #[tokio::test]
    async fn deleting_a_missing_id_is_a_noop() {
        let (state, _dir) = test_state();
        let transaction = state
            .ledger
            .lock()
            .unwrap()
            .add(draft("Groceries", -42.5))
            .expect("could not create test transaction");

        let response = delete_transaction_endpoint(
            State(state.clone()),
            Path(transaction.id + 1),
            Query(RedirectQuery::default()),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(state.ledger.lock().unwrap().all(), [transaction]);
    }
}
