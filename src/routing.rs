//! Application router configuration.

use axum::{
    Router,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{delete, get, post},
};

use crate::{
    AppState, endpoints,
    html::error_view,
    not_found::get_404_not_found,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, edit_transaction_endpoint,
        get_edit_transaction_page, get_transactions_page,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::TRANSACTIONS_VIEW, get(get_transactions_page))
        .route(
            endpoints::EDIT_TRANSACTION_VIEW,
            get(get_edit_transaction_page).put(edit_transaction_endpoint),
        )
        .route(
            endpoints::TRANSACTIONS_API,
            post(create_transaction_endpoint),
        )
        .route(
            endpoints::DELETE_TRANSACTION,
            delete(delete_transaction_endpoint),
        )
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        )
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the transactions page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::TRANSACTIONS_VIEW)
}

async fn get_internal_server_error_page() -> Response {
    render_internal_server_error(
        "Sorry, something went wrong.",
        "Try again later or check the server logs.",
    )
}

/// Render the internal server error page with a description of what went
/// wrong and a hint at how to fix it.
pub(crate) fn render_internal_server_error(description: &str, fix: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        error_view("Error", "500", description, fix),
    )
        .into_response()
}

#[cfg(test)]
mod routing_tests {
    use axum::{http::StatusCode, response::IntoResponse};
    use axum_htmx::HX_REDIRECT;
    use axum_test::TestServer;

    use crate::{AppState, endpoints, ledger::LedgerFile, routing::get_index_page};

    use super::build_router;

    fn test_server() -> (TestServer, tempfile::TempDir) {
        let dir = tempfile::tempdir().expect("could not create temp dir");
        let state = AppState::new(
            LedgerFile::new(dir.path().join("transactions.json")),
            "Etc/UTC",
        );

        (
            TestServer::try_new(build_router(state)).expect("could not create test server"),
            dir,
        )
    }

    #[tokio::test]
    async fn root_redirects_to_transactions() {
        let response = get_index_page().await.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let location = response.headers().get("location").unwrap();
        assert_eq!(location, endpoints::TRANSACTIONS_VIEW);
    }

    #[tokio::test]
    async fn unknown_paths_fall_back_to_not_found() {
        let (server, _dir) = test_server();

        let response = server.get("/definitely/not/a/page").await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn created_transactions_show_up_on_the_page() {
        let (server, _dir) = test_server();

        let response = server
            .post(endpoints::TRANSACTIONS_API)
            .form(&[
                ("description", "Coffee"),
                ("amount", "-4.50"),
                ("category", "food"),
                ("date", "2025-11-02"),
            ])
            .await;
        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(HX_REDIRECT).unwrap(),
            endpoints::TRANSACTIONS_VIEW
        );

        let page = server.get(endpoints::TRANSACTIONS_VIEW).await;
        page.assert_status_ok();
        let text = page.text();
        assert!(text.contains("Coffee"), "want the new transaction rendered");
        assert!(text.contains("$4.50"), "want the formatted amount rendered");
    }

    #[tokio::test]
    async fn submitting_without_a_category_responds_with_an_alert() {
        let (server, _dir) = test_server();

        let response = server
            .post(endpoints::TRANSACTIONS_API)
            .form(&[
                ("description", "Mystery"),
                ("amount", "-10.00"),
                ("category", ""),
                ("date", "2025-11-02"),
            ])
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(
            response.text().contains("Please select a category"),
            "want the validation alert in the response"
        );
    }
}
