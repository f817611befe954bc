/// User model and database operations
///
/// This module provides the User model and CRUD operations for managing user
/// accounts. Users own zero or more books (see [`crate::models::book`]).
///
/// # Schema
///
/// ```sql
/// CREATE TYPE user_role AS ENUM ('user', 'admin');
///
/// CREATE TABLE users (
///     id BIGSERIAL PRIMARY KEY,
///     username VARCHAR(255) NOT NULL UNIQUE,
///     password_hash VARCHAR(255) NOT NULL,
///     role user_role NOT NULL DEFAULT 'user',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// The password hash is only selected when a caller explicitly asks for it
/// (credential validation), and is never serialized into responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// User role
///
/// `Admin` marks the root-admin account created at bootstrap. Ownership
/// checks treat both roles identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
pub enum Role {
    /// Regular user
    User,

    /// Root administrator
    Admin,
}

/// User model representing an account
///
/// Passwords are stored as Argon2id hashes, never in plaintext. The hash is
/// `None` unless the row was fetched with `include_secret = true`, and is
/// skipped during serialization either way.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID, immutable once assigned
    pub id: i64,

    /// Username (unique, case-sensitive)
    pub username: String,

    /// Argon2id password hash, present only when explicitly requested
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,

    /// User role
    pub role: Role,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Username (must be unique)
    pub username: String,

    /// Argon2id password hash (NOT a plaintext password!)
    pub password_hash: String,

    /// Role for the new account
    pub role: Role,
}

impl User {
    /// Creates a new user in the database
    ///
    /// # Errors
    ///
    /// Returns an error if the username already exists (unique constraint
    /// violation) or the database is unreachable.
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash, role)
            VALUES ($1, $2, $3)
            RETURNING id, username, password_hash, role, created_at
            "#,
        )
        .bind(data.username)
        .bind(data.password_hash)
        .bind(data.role)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by ID
    ///
    /// The password hash is not selected; the returned user carries
    /// `password_hash: None`.
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, NULL AS password_hash, role, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by username
    ///
    /// The password hash is hidden by default. Credential validation passes
    /// `include_secret = true` to receive it; no other caller should.
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
        include_secret: bool,
    ) -> Result<Option<Self>, sqlx::Error> {
        let query = if include_secret {
            r#"
            SELECT id, username, password_hash, role, created_at
            FROM users
            WHERE username = $1
            "#
        } else {
            r#"
            SELECT id, username, NULL AS password_hash, role, created_at
            FROM users
            WHERE username = $1
            "#
        };

        let user = sqlx::query_as::<_, User>(query)
            .bind(username)
            .fetch_optional(pool)
            .await?;

        Ok(user)
    }
}
