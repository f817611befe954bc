/// Database models for BookVault
///
/// This module contains all database models and their CRUD operations.
///
/// # Models
///
/// - `user`: user accounts (owners of books)
/// - `book`: books, each owned by exactly one user, with an optional set of
///   readers granted read access
///
/// # Example
///
/// ```no_run
/// use bookvault_shared::models::user::{CreateUser, Role, User};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// let user = User::create(
///     &pool,
///     CreateUser {
///         username: "alice".to_string(),
///         password_hash: "$argon2id$...".to_string(),
///         role: Role::User,
///     },
/// )
/// .await?;
/// # Ok(())
/// # }
/// ```

pub mod book;
pub mod user;
