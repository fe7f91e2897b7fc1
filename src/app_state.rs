//! Implements a struct that holds the state of the server.

use std::sync::{Arc, Mutex};

use crate::transaction::Ledger;

/// The state of the server.
///
/// Holds the single in-memory [Ledger] instance for this process. Handlers
/// lock the mutex for the duration of a request, which serializes access
/// within the process. Nothing synchronizes access to the backing file
/// across processes: if another process rewrites the same file, the last
/// full rewrite wins.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The transaction ledger shared by all request handlers.
    pub ledger: Arc<Mutex<Ledger>>,
}

impl AppState {
    /// Create a new [AppState] holding `ledger`.
    pub fn new(ledger: Ledger) -> Self {
        Self {
            ledger: Arc::new(Mutex::new(ledger)),
        }
    }
}
