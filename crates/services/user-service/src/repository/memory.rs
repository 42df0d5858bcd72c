//! In-process user store.
//!
//! Used when no database is configured and by the HTTP tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use common::RepositoryResult;
use domain::User;

use super::UserRepository;

#[derive(Debug)]
struct Inner {
    users: BTreeMap<i32, User>,
    next_id: i32,
}

/// UserRepository keeping users in memory, ordered by id.
#[derive(Debug)]
pub struct InMemoryUserStore {
    inner: RwLock<Inner>,
}

impl InMemoryUserStore {
    /// Create an empty store; the first created user gets id 1.
    pub fn new() -> Self {
        Self::with_users(Vec::new())
    }

    /// Create a store seeded with already-persisted users.
    pub fn with_users(users: Vec<User>) -> Self {
        let next_id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        let users = users.into_iter().map(|u| (u.id, u)).collect();

        Self {
            inner: RwLock::new(Inner { users, next_id }),
        }
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserStore {
    async fn get_all(&self) -> RepositoryResult<Vec<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i32) -> RepositoryResult<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.get(&id).cloned())
    }

    async fn create(&self, mut user: User) -> RepositoryResult<bool> {
        let mut inner = self.inner.write().await;
        user.id = inner.next_id;
        inner.next_id += 1;
        inner.users.insert(user.id, user);
        Ok(true)
    }

    async fn update(&self, user: User) -> RepositoryResult<bool> {
        let mut inner = self.inner.write().await;
        match inner.users.get_mut(&user.id) {
            Some(stored) => {
                *stored = user;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, user: User) -> RepositoryResult<bool> {
        let mut inner = self.inner.write().await;
        Ok(inner.users.remove(&user.id).is_some())
    }

    async fn name_exists(&self, name: &str) -> RepositoryResult<bool> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().any(|u| u.name == name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn user(id: i32, name: &str) -> User {
        User {
            id,
            name: name.to_string(),
            age: 30,
            date_of_birth: NaiveDate::from_ymd_opt(1994, 6, 4).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let store = InMemoryUserStore::new();

        assert!(store.create(user(0, "Alice")).await.unwrap());
        assert!(store.create(user(0, "Bob")).await.unwrap());

        let users = store.get_all().await.unwrap();
        assert_eq!(users.iter().map(|u| u.id).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_seeded_store_continues_after_highest_id() {
        let store = InMemoryUserStore::with_users(vec![user(5, "Alice")]);

        store.create(user(0, "Bob")).await.unwrap();

        assert_eq!(store.get_by_id(6).await.unwrap().unwrap().name, "Bob");
    }

    #[tokio::test]
    async fn test_update_and_delete_report_missing_rows() {
        let store = InMemoryUserStore::with_users(vec![user(1, "Alice")]);

        assert!(store.update(user(1, "Alicia")).await.unwrap());
        assert!(!store.update(user(2, "Nobody")).await.unwrap());
        assert!(store.delete(user(1, "Alicia")).await.unwrap());
        assert!(!store.delete(user(1, "Alicia")).await.unwrap());
    }

    #[tokio::test]
    async fn test_name_exists_is_case_sensitive() {
        let store = InMemoryUserStore::with_users(vec![user(1, "Alice")]);

        assert!(store.name_exists("Alice").await.unwrap());
        assert!(!store.name_exists("alice").await.unwrap());
    }
}
