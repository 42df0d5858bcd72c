//! User service - Handles user-related business logic.
//!
//! SOLID (SRP): the only place where user business rules are enforced.
//! Each operation is a linear pipeline: validate, check existence and
//! uniqueness, build the new state, delegate to the repository, log.

use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use common::{AppError, AppResult, OptionExt};
use domain::{
    apply_update, violations, CreateUserRequest, UpdateUserRequest, User,
    CREATE_VIOLATION_SEPARATOR, NAME_ALREADY_EXISTS, UPDATE_VIOLATION_SEPARATOR, USER_NOT_FOUND,
};

use super::instrumentation::{cancellable, instrumented, Operation};
use crate::repository::UserRepository;

/// User service trait for dependency injection.
///
/// Every operation takes a cancellation token; when it fires, the pending
/// repository call is dropped and `RepositoryError::Cancelled` is returned.
#[async_trait]
pub trait UserService: Send + Sync {
    /// List all users
    async fn list_users(&self, cancel: &CancellationToken) -> AppResult<Vec<User>>;

    /// Create a user; `true` iff the repository persisted it
    async fn create_user(
        &self,
        request: CreateUserRequest,
        cancel: &CancellationToken,
    ) -> AppResult<bool>;

    /// Delete the user with this id
    async fn delete_user(&self, id: i32, cancel: &CancellationToken) -> AppResult<bool>;

    /// Replace name, age and date of birth of an existing user
    async fn update_user(
        &self,
        request: UpdateUserRequest,
        cancel: &CancellationToken,
    ) -> AppResult<bool>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    async fn ensure_name_free(&self, name: &str, cancel: &CancellationToken) -> AppResult<()> {
        if cancellable(cancel, self.repo.name_exists(name)).await? {
            return Err(AppError::invalid_argument(NAME_ALREADY_EXISTS));
        }
        Ok(())
    }

    async fn find_existing(&self, id: i32, cancel: &CancellationToken) -> AppResult<User> {
        cancellable(cancel, self.repo.get_by_id(id))
            .await?
            .ok_or_invalid_argument(USER_NOT_FOUND)
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn list_users(&self, cancel: &CancellationToken) -> AppResult<Vec<User>> {
        instrumented(Operation::ListUsers, cancel, self.repo.get_all()).await
    }

    async fn create_user(
        &self,
        request: CreateUserRequest,
        cancel: &CancellationToken,
    ) -> AppResult<bool> {
        let violations = violations(&request);
        if !violations.is_empty() {
            return Err(AppError::from_violations(
                &violations,
                CREATE_VIOLATION_SEPARATOR,
            ));
        }

        self.ensure_name_free(&request.name, cancel).await?;

        let user = User::from(request);
        let operation = Operation::CreateUser {
            user_id: user.id,
            user_name: &user.name,
        };

        instrumented(operation, cancel, self.repo.create(user.clone())).await
    }

    async fn delete_user(&self, id: i32, cancel: &CancellationToken) -> AppResult<bool> {
        let user = self.find_existing(id, cancel).await?;

        let operation = Operation::DeleteUser { user_id: id };
        instrumented(operation, cancel, self.repo.delete(user)).await
    }

    async fn update_user(
        &self,
        request: UpdateUserRequest,
        cancel: &CancellationToken,
    ) -> AppResult<bool> {
        let existing = self.find_existing(request.id, cancel).await?;

        let violations = violations(&request);
        if !violations.is_empty() {
            return Err(AppError::from_violations(
                &violations,
                UPDATE_VIOLATION_SEPARATOR,
            ));
        }

        // Keeping the current name must not collide with itself
        if request.name != existing.name {
            self.ensure_name_free(&request.name, cancel).await?;
        }

        let updated = apply_update(&existing, &request);
        let operation = Operation::UpdateUser {
            user_id: updated.id,
            user_name: &updated.name,
        };

        instrumented(operation, cancel, self.repo.update(updated.clone())).await
    }
}
