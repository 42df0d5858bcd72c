//! HTTP API layer - translates service results into responses.
//!
//! Business rules live in the service; handlers only pick a status code and
//! a message for the outcome.

pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod state;

pub use openapi::ApiDoc;
pub use routes::create_router;
pub use state::AppState;
