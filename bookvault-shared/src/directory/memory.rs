/// In-memory directory implementation
///
/// A `Mutex<Vec<_>>`-backed implementation of the directory traits, used by
/// the test suites to exercise the auth core without a database. Uniqueness
/// and id assignment mirror the PostgreSQL implementation.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use super::{DirectoryError, ResourceStore, UserDirectory};
use crate::models::user::{Role, User};

/// In-memory user directory
#[derive(Default)]
pub struct InMemoryDirectory {
    users: Mutex<Vec<User>>,
}

impl InMemoryDirectory {
    /// Creates an empty directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    /// True when no users are stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn without_secret(user: &User) -> User {
    User {
        password_hash: None,
        ..user.clone()
    }
}

#[async_trait]
impl UserDirectory for InMemoryDirectory {
    async fn find_by_username(
        &self,
        username: &str,
        include_secret: bool,
    ) -> Result<Option<User>, DirectoryError> {
        let users = self.users.lock().unwrap();
        let found = users.iter().find(|u| u.username == username);

        Ok(found.map(|u| {
            if include_secret {
                u.clone()
            } else {
                without_secret(u)
            }
        }))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DirectoryError> {
        let users = self.users.lock().unwrap();

        Ok(users.iter().find(|u| u.id == id).map(without_secret))
    }

    async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
        role: Role,
    ) -> Result<User, DirectoryError> {
        let mut users = self.users.lock().unwrap();

        // Uniqueness check and insert under one lock, like the database's
        // unique index
        if users.iter().any(|u| u.username == username) {
            return Err(DirectoryError::Conflict);
        }

        let user = User {
            id: users.len() as i64 + 1,
            username: username.to_string(),
            password_hash: Some(password_hash.to_string()),
            role,
            created_at: Utc::now(),
        };
        users.push(user.clone());

        Ok(without_secret(&user))
    }
}

/// In-memory owned-resource store
///
/// Tracks only the fact the authorization core needs: which user owns which
/// resource.
#[derive(Default)]
pub struct InMemoryShelf {
    owners: Mutex<Vec<(i64, i64)>>, // (resource_id, owner_id)
}

impl InMemoryShelf {
    /// Creates an empty shelf
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a new resource owned by `owner_id`, returning its id
    pub fn add(&self, owner_id: i64) -> i64 {
        let mut owners = self.owners.lock().unwrap();
        let id = owners.len() as i64 + 1;
        owners.push((id, owner_id));
        id
    }
}

#[async_trait]
impl ResourceStore for InMemoryShelf {
    async fn owner_of(&self, resource_id: i64) -> Result<Option<i64>, DirectoryError> {
        let owners = self.owners.lock().unwrap();

        Ok(owners
            .iter()
            .find(|(id, _)| *id == resource_id)
            .map(|(_, owner)| *owner))
    }
}
