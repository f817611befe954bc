/// Directory interfaces consumed by the auth core
///
/// The authentication core is written against two small traits rather than a
/// concrete database:
///
/// - [`UserDirectory`]: persistent store of users, keyed by id and by unique
///   username
/// - [`ResourceStore`]: answers "who owns this resource", the only fact the
///   authorization core needs about books
///
/// `sqlx::PgPool` implements both (see [`postgres`]); tests use the
/// [`memory::InMemoryDirectory`] implementation.

use async_trait::async_trait;

use crate::models::user::{Role, User};

pub mod memory;
pub mod postgres;

/// Error type for directory operations
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// Username already exists
    #[error("Username already exists")]
    Conflict,

    /// Underlying store failed; propagated unchanged, callers decide retry
    /// policy
    #[error("Directory backend error: {0}")]
    Backend(String),
}

impl From<sqlx::Error> for DirectoryError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                DirectoryError::Conflict
            }
            other => DirectoryError::Backend(other.to_string()),
        }
    }
}

/// Persistent store of user accounts
///
/// Username uniqueness is enforced by the implementation; `create_user` on a
/// taken username fails with [`DirectoryError::Conflict`].
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Finds a user by username
    ///
    /// The stored password hash is included only when `include_secret` is
    /// true; every other caller receives `password_hash: None`.
    async fn find_by_username(
        &self,
        username: &str,
        include_secret: bool,
    ) -> Result<Option<User>, DirectoryError>;

    /// Finds a user by ID (never includes the password hash)
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DirectoryError>;

    /// Creates a new user
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Conflict`] if the username is taken.
    async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
        role: Role,
    ) -> Result<User, DirectoryError>;
}

/// Ownership lookup for owned resources
#[async_trait]
pub trait ResourceStore: Send + Sync {
    /// Returns the owner ID of a resource, or None if the resource is absent
    async fn owner_of(&self, resource_id: i64) -> Result<Option<i64>, DirectoryError>;
}
