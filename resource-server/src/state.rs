//! Shared application state for the resource server.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::resources::ResourceStore;

/// Shared state accessible from all request handlers.
#[derive(Clone, Default)]
pub struct AppState {
    store: Arc<Mutex<ResourceStore>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the record store. Never hold the guard across an `.await`.
    pub fn store(&self) -> MutexGuard<'_, ResourceStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
