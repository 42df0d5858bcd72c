//! Health check handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;

use crate::api::state::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub storage: StorageHealth,
}

/// Health of the user store with optional error message.
#[derive(Debug, Serialize)]
pub struct StorageHealth {
    pub backend: &'static str,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Create health routes.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

/// Health check endpoint - verifies database connectivity when one is used.
pub async fn health_check(State(state): State<AppState>) -> Response {
    let storage = match &state.database {
        None => StorageHealth {
            backend: "memory",
            status: "healthy".to_string(),
            error: None,
        },
        Some(db) => match db.ping().await {
            Ok(_) => StorageHealth {
                backend: "postgres",
                status: "healthy".to_string(),
                error: None,
            },
            Err(e) => StorageHealth {
                backend: "postgres",
                status: "unhealthy".to_string(),
                error: Some(e.to_string()),
            },
        },
    };

    let all_healthy = storage.status == "healthy";

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        storage,
    };

    if all_healthy {
        (StatusCode::OK, Json(response)).into_response()
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Json(response)).into_response()
    }
}
