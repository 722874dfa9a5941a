//! Implements the struct that holds the state shared by the route handlers.

use std::sync::{Arc, Mutex};

use crate::ledger::{Ledger, LedgerFile};

/// The state of the server.
///
/// The ledger is the only mutable state in the process. It lives behind a
/// mutex so each handler runs its whole operation (mutate, persist, render
/// inputs) before the next one starts.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,

    /// The transaction ledger.
    pub ledger: Arc<Mutex<Ledger>>,
}

impl AppState {
    /// Create a new [AppState] backed by the ledger file at `ledger_file`.
    ///
    /// The persisted collection is loaded eagerly, once, at startup; an
    /// absent or unreadable file starts the ledger empty.
    pub fn new(ledger_file: LedgerFile, local_timezone: &str) -> Self {
        Self {
            local_timezone: local_timezone.to_owned(),
            ledger: Arc::new(Mutex::new(Ledger::open(ledger_file))),
        }
    }
}
