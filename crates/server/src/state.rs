use std::sync::Arc;

use service::users::{UserRepository, UserStore};

/// Shared handler state. The repository is built once at startup and
/// injected here; handlers never reach for global state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
}

impl AppState {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// State backed by a fresh, empty in-memory store.
    pub fn in_memory() -> Self {
        Self::new(UserStore::new())
    }
}
