//! User repository port and its SeaORM implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use common::RepositoryResult;
use domain::User;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Implementations own persisted state. Every call may be abandoned by the
/// caller; dropping the returned future must leave the store consistent.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// List every stored user
    async fn get_all(&self) -> RepositoryResult<Vec<User>>;

    /// Find user by ID
    async fn get_by_id(&self, id: i32) -> RepositoryResult<Option<User>>;

    /// Persist a new user; the store assigns the id
    async fn create(&self, user: User) -> RepositoryResult<bool>;

    /// Overwrite the stored user with the same id
    async fn update(&self, user: User) -> RepositoryResult<bool>;

    /// Remove the stored user with the same id
    async fn delete(&self, user: User) -> RepositoryResult<bool>;

    /// Check whether any stored user has exactly this name
    async fn name_exists(&self, name: &str) -> RepositoryResult<bool>;
}

/// Concrete implementation of UserRepository backed by PostgreSQL
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn get_all(&self) -> RepositoryResult<Vec<User>> {
        let models = UserEntity::find()
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn get_by_id(&self, id: i32) -> RepositoryResult<Option<User>> {
        let result = UserEntity::find_by_id(id).one(&self.db).await?;

        Ok(result.map(User::from))
    }

    async fn create(&self, user: User) -> RepositoryResult<bool> {
        let active_model = ActiveModel {
            id: NotSet,
            name: Set(user.name),
            age: Set(user.age),
            date_of_birth: Set(user.date_of_birth),
        };

        let model = active_model.insert(&self.db).await?;
        tracing::debug!(user_id = model.id, "User row inserted");
        Ok(true)
    }

    async fn update(&self, user: User) -> RepositoryResult<bool> {
        let active_model = ActiveModel {
            id: Set(user.id),
            name: Set(user.name),
            age: Set(user.age),
            date_of_birth: Set(user.date_of_birth),
        };

        match active_model.update(&self.db).await {
            Ok(_) => Ok(true),
            Err(DbErr::RecordNotUpdated) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, user: User) -> RepositoryResult<bool> {
        let result = UserEntity::delete_by_id(user.id).exec(&self.db).await?;

        Ok(result.rows_affected > 0)
    }

    async fn name_exists(&self, name: &str) -> RepositoryResult<bool> {
        let count = UserEntity::find()
            .filter(user::Column::Name.eq(name))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }
}
