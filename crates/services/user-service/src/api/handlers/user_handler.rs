//! User handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get},
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use common::AppResult;
use domain::{CreateUserRequest, UpdateUserRequest, UserResponse};

use crate::api::state::AppState;

pub const USER_CREATED: &str = "User has been created successfully.";
pub const USER_NOT_CREATED: &str = "An error occurred while creating the user.";
pub const USER_UPDATED: &str = "User has been updated successfully.";
pub const USER_NOT_UPDATED: &str = "Take an error while the user update process.";
pub const USER_DELETED: &str = "User has been deleted successfully.";
pub const USER_NOT_DELETED: &str = "Take an error while the user deletion process.";

/// Outcome message for mutating endpoints
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "User has been created successfully.")]
    pub message: String,
}

/// 200 with `ok` when the repository reported success, 400 with `failed` otherwise.
fn outcome(done: bool, ok: &str, failed: &str) -> (StatusCode, Json<MessageResponse>) {
    let (status, message) = if done {
        (StatusCode::OK, ok)
    } else {
        (StatusCode::BAD_REQUEST, failed)
    };

    (
        status,
        Json(MessageResponse {
            message: message.to_string(),
        }),
    )
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user).put(update_user))
        .route("/:id", delete(delete_user))
}

/// List all users
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses(
        (status = 200, description = "List of all users", body = Vec<UserResponse>),
        (status = 500, description = "Repository failure")
    )
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserResponse>>> {
    let users = state
        .user_service
        .list_users(&state.request_token())
        .await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Create a user
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "User created", body = MessageResponse),
        (status = 400, description = "Validation error, duplicate name or store refused the user"),
        (status = 500, description = "Repository failure")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let created = state
        .user_service
        .create_user(payload, &state.request_token())
        .await?;

    Ok(outcome(created, USER_CREATED, USER_NOT_CREATED))
}

/// Update a user
#[utoipa::path(
    put,
    path = "/api/users",
    tag = "Users",
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = MessageResponse),
        (status = 400, description = "Validation error, unknown user or duplicate name"),
        (status = 500, description = "Repository failure")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Json(payload): Json<UpdateUserRequest>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let updated = state
        .user_service
        .update_user(payload, &state.request_token())
        .await?;

    Ok(outcome(updated, USER_UPDATED, USER_NOT_UPDATED))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 400, description = "Unknown user"),
        (status = 500, description = "Repository failure")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let deleted = state
        .user_service
        .delete_user(id, &state.request_token())
        .await?;

    Ok(outcome(deleted, USER_DELETED, USER_NOT_DELETED))
}
