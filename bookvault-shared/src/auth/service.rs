/// Credential validation and token authentication
///
/// This module ties the signing core to the user directory:
///
/// - [`validate_credentials`]: sign-in path, username/password against the
///   directory
/// - [`issue_token`]: turns a validated identity into a signed bearer token
/// - [`authenticate_token`]: every-authenticated-request path, signed token
///   back into an identity
///
/// All credential and token failures collapse into the single
/// [`AuthError::InvalidCredentials`] variant, so a caller (and therefore a
/// client) cannot distinguish "no such user" from "wrong password" from
/// "expired token". Directory failures propagate unchanged.

use chrono::Duration;
use serde::Serialize;
use tracing::debug;

use super::{jwt, password};
use crate::directory::{DirectoryError, UserDirectory};
use crate::models::user::{Role, User};

/// Error type for authentication operations
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Bad credentials, or an invalid/expired/tampered token, or a token
    /// whose subject no longer exists. Deliberately a single undifferentiated
    /// variant.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Directory failure unrelated to the credentials themselves
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

/// The authenticated principal derived from validated credentials or a
/// validated token
///
/// Carries no secret material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatedIdentity {
    /// User ID
    pub id: i64,

    /// Username
    pub username: String,

    /// Current role, as stored in the directory
    pub role: Role,
}

impl From<User> for AuthenticatedIdentity {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            role: user.role,
        }
    }
}

/// Validates a username/password pair against the directory
///
/// Looks the user up with the normally-hidden password hash included and
/// verifies the password in constant time.
///
/// # Errors
///
/// Returns [`AuthError::InvalidCredentials`] when the user does not exist or
/// the password does not match; the two cases are observably identical.
pub async fn validate_credentials(
    directory: &dyn UserDirectory,
    username: &str,
    password_attempt: &str,
) -> Result<AuthenticatedIdentity, AuthError> {
    let user = directory.find_by_username(username, true).await?;

    let Some(user) = user else {
        debug!("sign-in rejected: unknown username");
        return Err(AuthError::InvalidCredentials);
    };

    let Some(hash) = user.password_hash.as_deref() else {
        return Err(AuthError::InvalidCredentials);
    };

    if !password::verify_password(password_attempt, hash) {
        debug!(user_id = user.id, "sign-in rejected: password mismatch");
        return Err(AuthError::InvalidCredentials);
    }

    Ok(user.into())
}

/// Issues a signed bearer token for an authenticated identity
///
/// Encodes the identity claims plus issue time and expiry. Does not touch
/// the directory.
pub fn issue_token(
    identity: &AuthenticatedIdentity,
    secret: &str,
    lifetime: Duration,
) -> Result<String, jwt::JwtError> {
    let claims = jwt::Claims::new(identity.id, &identity.username, identity.role, lifetime);

    jwt::create_token(&claims, secret)
}

/// Authenticates a bearer token into an identity
///
/// Verifies the token's signature, structure and expiry, then re-resolves
/// the subject against the directory. The re-resolution guards against
/// tokens issued for since-removed users and is the source of the current
/// role; the role claim inside the token is never trusted on its own.
///
/// # Errors
///
/// Returns [`AuthError::InvalidCredentials`] for any token failure or a
/// missing subject.
pub async fn authenticate_token(
    directory: &dyn UserDirectory,
    token: &str,
    secret: &str,
) -> Result<AuthenticatedIdentity, AuthError> {
    let claims = jwt::validate_token(token, secret).map_err(|e| {
        debug!("token rejected: {}", e);
        AuthError::InvalidCredentials
    })?;

    let user = directory
        .find_by_id(claims.id)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    Ok(user.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::hash_password;
    use crate::directory::memory::InMemoryDirectory;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    async fn directory_with(username: &str, password_attempt: &str) -> InMemoryDirectory {
        let directory = InMemoryDirectory::new();
        let hash = hash_password(password_attempt).unwrap();
        directory
            .create_user(username, &hash, Role::User)
            .await
            .unwrap();
        directory
    }

    #[tokio::test]
    async fn test_validate_credentials_success() {
        let directory = directory_with("alice", "pw1234").await;

        let identity = validate_credentials(&directory, "alice", "pw1234")
            .await
            .unwrap();

        assert_eq!(identity.username, "alice");
        assert_eq!(identity.role, Role::User);
    }

    #[tokio::test]
    async fn test_credential_failures_are_indistinguishable() {
        let directory = directory_with("alice", "pw1234").await;

        let wrong_password = validate_credentials(&directory, "alice", "wrong")
            .await
            .unwrap_err();
        let unknown_user = validate_credentials(&directory, "nobody", "pw1234")
            .await
            .unwrap_err();

        // Same variant, same message: no enumeration signal
        assert!(matches!(wrong_password, AuthError::InvalidCredentials));
        assert!(matches!(unknown_user, AuthError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
    }

    #[tokio::test]
    async fn test_issue_and_authenticate_token() {
        let directory = directory_with("alice", "pw1234").await;
        let identity = validate_credentials(&directory, "alice", "pw1234")
            .await
            .unwrap();

        let token = issue_token(&identity, SECRET, jwt::Claims::default_lifetime()).unwrap();
        let authenticated = authenticate_token(&directory, &token, SECRET)
            .await
            .unwrap();

        assert_eq!(authenticated, identity);
    }

    #[tokio::test]
    async fn test_expired_token_rejected() {
        let directory = directory_with("alice", "pw1234").await;
        let identity = validate_credentials(&directory, "alice", "pw1234")
            .await
            .unwrap();

        let token = issue_token(&identity, SECRET, Duration::seconds(-3600)).unwrap();
        let result = authenticate_token(&directory, &token, SECRET).await;

        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_token_for_removed_subject_rejected() {
        // Token issued against one directory, presented against an empty one:
        // the subject no longer exists
        let directory = directory_with("alice", "pw1234").await;
        let identity = validate_credentials(&directory, "alice", "pw1234")
            .await
            .unwrap();
        let token = issue_token(&identity, SECRET, jwt::Claims::default_lifetime()).unwrap();

        let empty = InMemoryDirectory::new();
        let result = authenticate_token(&empty, &token, SECRET).await;

        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_role_comes_from_directory_not_claim() {
        // Issue a token claiming admin for a user the directory stores as a
        // regular user; authentication must report the directory's role
        let directory = directory_with("alice", "pw1234").await;
        let stored = directory
            .find_by_username("alice", false)
            .await
            .unwrap()
            .unwrap();

        let forged_role = AuthenticatedIdentity {
            id: stored.id,
            username: "alice".to_string(),
            role: Role::Admin,
        };
        let token = issue_token(&forged_role, SECRET, jwt::Claims::default_lifetime()).unwrap();

        let authenticated = authenticate_token(&directory, &token, SECRET)
            .await
            .unwrap();
        assert_eq!(authenticated.role, Role::User);
    }

    #[tokio::test]
    async fn test_identity_never_serializes_secret_material() {
        let identity = AuthenticatedIdentity {
            id: 1,
            username: "alice".to_string(),
            role: Role::User,
        };

        let json = serde_json::to_string(&identity).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("hash"));
    }
}
