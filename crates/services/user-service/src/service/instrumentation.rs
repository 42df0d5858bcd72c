//! Timing, logging and cancellation around repository calls.
//!
//! Every service operation funnels its main repository call through
//! [`instrumented`], which logs one start message, times the call, logs the
//! fault on failure and always logs one completion message.

use std::future::Future;
use std::time::Instant;

use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use common::{AppResult, RepositoryError, RepositoryResult};

/// Run a repository call unless `cancel` fires first.
///
/// A cancelled call is dropped and reported as `RepositoryError::Cancelled`.
pub(crate) async fn cancellable<T, F>(cancel: &CancellationToken, call: F) -> RepositoryResult<T>
where
    F: Future<Output = RepositoryResult<T>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(RepositoryError::Cancelled),
        result = call => result,
    }
}

/// A service operation together with the values its log lines mention.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Operation<'a> {
    ListUsers,
    CreateUser { user_id: i32, user_name: &'a str },
    DeleteUser { user_id: i32 },
    UpdateUser { user_id: i32, user_name: &'a str },
}

impl Operation<'_> {
    fn log_started(&self) {
        match *self {
            Operation::ListUsers => info!("Get all users"),
            Operation::CreateUser { user_name, .. } => {
                info!(user_name, "Starting creation of user {}", user_name)
            }
            Operation::DeleteUser { user_id } => {
                info!(user_id, "Starting deletion of user {}", user_id)
            }
            Operation::UpdateUser { user_id, user_name } => {
                info!(user_id, user_name, "Updating user {}", user_name)
            }
        }
    }

    fn log_completed(&self, elapsed_ms: u64) {
        match *self {
            Operation::ListUsers => info!(elapsed_ms, "Get all users completed"),
            Operation::CreateUser { user_id, .. } => info!(
                user_id,
                elapsed_ms,
                "Creation of user {} completed in {} ms",
                user_id,
                elapsed_ms
            ),
            Operation::DeleteUser { user_id } => info!(
                user_id,
                elapsed_ms,
                "Deletion of user {} completed in {} ms",
                user_id,
                elapsed_ms
            ),
            Operation::UpdateUser { user_id, .. } => info!(
                user_id,
                elapsed_ms,
                "Update of user {} completed in {} ms",
                user_id,
                elapsed_ms
            ),
        }
    }

    /// Fixed message logged next to a repository fault
    pub(crate) fn failure_message(&self) -> &'static str {
        match self {
            Operation::ListUsers => "An error occurred while getting all users",
            Operation::CreateUser { .. } => "An error occurred while creating user",
            Operation::DeleteUser { .. } => "An error occurred while deleting user",
            Operation::UpdateUser { .. } => "An error occurred while updating user",
        }
    }
}

/// Log, time and run `call` on behalf of `operation`.
///
/// The fault, if any, is returned unchanged after being logged.
pub(crate) async fn instrumented<T, F>(
    operation: Operation<'_>,
    cancel: &CancellationToken,
    call: F,
) -> AppResult<T>
where
    F: Future<Output = RepositoryResult<T>>,
{
    operation.log_started();
    let started = Instant::now();

    let result = cancellable(cancel, call).await;

    if let Err(err) = &result {
        error!(error = %err, "{}", operation.failure_message());
    }
    let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    operation.log_completed(elapsed_ms);

    result.map_err(Into::into)
}
