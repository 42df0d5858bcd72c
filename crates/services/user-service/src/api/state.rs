//! Application state for dependency injection.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::infra::Database;
use crate::service::UserService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserService>,
    /// Present only when users are stored in PostgreSQL
    pub database: Option<Database>,
    /// Cancelled when the server shuts down
    pub shutdown: CancellationToken,
}

impl AppState {
    /// Create new app state.
    pub fn new(
        user_service: Arc<dyn UserService>,
        database: Option<Database>,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            user_service,
            database,
            shutdown,
        }
    }

    /// Token for one request; cancelled with the server.
    pub fn request_token(&self) -> CancellationToken {
        self.shutdown.child_token()
    }
}
