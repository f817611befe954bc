/// Book model and database operations
///
/// Books are the owned resources of BookVault. Each book has exactly one
/// owner, set at creation and never reassigned; updates may change the title
/// and text only. A book can additionally grant read access to a set of
/// reader users, which plays no part in ownership checks.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE books (
///     id BIGSERIAL PRIMARY KEY,
///     title VARCHAR(255) NOT NULL,
///     text TEXT NOT NULL,
///     owner_id BIGINT NOT NULL REFERENCES users(id),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
///
/// CREATE TABLE book_readers (
///     book_id BIGINT NOT NULL REFERENCES books(id) ON DELETE CASCADE,
///     user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     PRIMARY KEY (book_id, user_id)
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::models::user::User;

/// Book model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Book {
    /// Unique book ID
    pub id: i64,

    /// Book title
    pub title: String,

    /// Book text/content
    pub text: String,

    /// Owning user's ID, immutable after creation
    pub owner_id: i64,

    /// When the book was created
    pub created_at: DateTime<Utc>,

    /// When the book was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new book
#[derive(Debug, Clone)]
pub struct CreateBook {
    /// Book title
    pub title: String,

    /// Book text/content
    pub text: String,
}

/// Input for updating a book
///
/// The owner is deliberately absent: ownership cannot be reassigned.
#[derive(Debug, Clone)]
pub struct UpdateBook {
    /// New title
    pub title: String,

    /// New text/content
    pub text: String,
}

impl Book {
    /// Creates a new book owned by `owner_id`
    pub async fn create(
        pool: &PgPool,
        owner_id: i64,
        data: CreateBook,
    ) -> Result<Self, sqlx::Error> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, text, owner_id)
            VALUES ($1, $2, $3)
            RETURNING id, title, text, owner_id, created_at, updated_at
            "#,
        )
        .bind(data.title)
        .bind(data.text)
        .bind(owner_id)
        .fetch_one(pool)
        .await?;

        Ok(book)
    }

    /// Finds a book by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, text, owner_id, created_at, updated_at
            FROM books
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(book)
    }

    /// Lists all books, newest first
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, text, owner_id, created_at, updated_at
            FROM books
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(books)
    }

    /// Updates a book's title and text
    ///
    /// The owner column is never touched. Callers are expected to have
    /// passed the ownership check before invoking this.
    pub async fn update(
        pool: &PgPool,
        id: i64,
        data: UpdateBook,
    ) -> Result<Option<Self>, sqlx::Error> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET title = $2, text = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, text, owner_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(data.title)
        .bind(data.text)
        .fetch_optional(pool)
        .await?;

        Ok(book)
    }

    /// Deletes a book by ID
    ///
    /// Returns true if a row was deleted. Reader grants cascade.
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Grants a user read access to a book
    ///
    /// Granting twice is a no-op.
    pub async fn add_reader(pool: &PgPool, book_id: i64, user_id: i64) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO book_readers (book_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT (book_id, user_id) DO NOTHING
            "#,
        )
        .bind(book_id)
        .bind(user_id)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Lists the users granted read access to a book
    pub async fn list_readers(pool: &PgPool, book_id: i64) -> Result<Vec<User>, sqlx::Error> {
        let readers = sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.username, NULL AS password_hash, u.role, u.created_at
            FROM users u
            JOIN book_readers br ON br.user_id = u.id
            WHERE br.book_id = $1
            ORDER BY u.id
            "#,
        )
        .bind(book_id)
        .fetch_all(pool)
        .await?;

        Ok(readers)
    }
}
