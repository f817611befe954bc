/// PostgreSQL directory implementation
///
/// Implements the directory traits for `sqlx::PgPool` by delegating to the
/// model CRUD functions. Unique-violation errors surface as
/// [`DirectoryError::Conflict`]; everything else propagates as
/// [`DirectoryError::Backend`].

use async_trait::async_trait;
use sqlx::PgPool;

use super::{DirectoryError, ResourceStore, UserDirectory};
use crate::models::{
    book::Book,
    user::{CreateUser, Role, User},
};

#[async_trait]
impl UserDirectory for PgPool {
    async fn find_by_username(
        &self,
        username: &str,
        include_secret: bool,
    ) -> Result<Option<User>, DirectoryError> {
        Ok(User::find_by_username(self, username, include_secret).await?)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DirectoryError> {
        Ok(User::find_by_id(self, id).await?)
    }

    async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
        role: Role,
    ) -> Result<User, DirectoryError> {
        let user = User::create(
            self,
            CreateUser {
                username: username.to_string(),
                password_hash: password_hash.to_string(),
                role,
            },
        )
        .await?;

        Ok(user)
    }
}

#[async_trait]
impl ResourceStore for PgPool {
    async fn owner_of(&self, resource_id: i64) -> Result<Option<i64>, DirectoryError> {
        let book = Book::find_by_id(self, resource_id).await?;

        Ok(book.map(|b| b.owner_id))
    }
}
