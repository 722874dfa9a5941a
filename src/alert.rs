//! Alert partials for surfacing error messages.
//!
//! Alerts render into the fixed `#alert-container` via htmx response
//! targeting, so a failed form submission leaves the page in place and
//! shows a message instead of navigating away.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

/// An alert message with a bold headline and optional details.
pub struct Alert<'a> {
    message: &'a str,
    details: &'a str,
}

impl<'a> Alert<'a> {
    /// Create a new error alert.
    pub fn error(message: &'a str, details: &'a str) -> Self {
        Self { message, details }
    }

    /// Render the alert markup, replacing the page's alert container so the
    /// alert becomes visible in place.
    pub fn into_markup(self) -> Markup {
        html!(
            div
                id="alert-container"
                class="w-full max-w-md px-4"
                style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
            {
                div
                    class="p-4 text-sm rounded-lg shadow-lg border text-red-800 bg-red-50 \
                        border-red-300 dark:bg-gray-800 dark:text-red-400 dark:border-red-800"
                    role="alert"
                {
                    p class="font-medium" { (self.message) }

                    @if !self.details.is_empty()
                    {
                        p { (self.details) }
                    }
                }
            }
        )
    }

    /// Render the alert as an HTTP response with `status`.
    pub fn into_response(self, status: StatusCode) -> Response {
        (status, self.into_markup()).into_response()
    }
}
