/// Signed token generation and validation
///
/// This module provides the stateless bearer-token core for BookVault.
/// Tokens are signed using HS256 (HMAC-SHA256) with a process-wide secret
/// and carry the identity claims needed to authenticate a request.
///
/// # Security
///
/// - **Algorithm**: HS256 (HMAC with SHA-256)
/// - **Expiration**: Configurable (default 1 hour)
/// - **Validation**: Signature and expiration checks
/// - **Secret Management**: Secrets should be at least 32 bytes (256 bits)
///
/// Tokens have no server-side record: they become invalid purely through
/// expiry or signature mismatch.
///
/// # Example
///
/// ```
/// use bookvault_shared::auth::jwt::{create_token, validate_token, Claims};
/// use bookvault_shared::models::user::Role;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let claims = Claims::new(42, "alice", Role::User, Claims::default_lifetime());
/// let token = create_token(&claims, "your-secret-key-at-least-32-bytes")?;
///
/// let validated = validate_token(&token, "your-secret-key-at-least-32-bytes")?;
/// assert_eq!(validated.id, 42);
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::models::user::Role;

/// Error type for token operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Failed to create token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Token has expired
    #[error("Token has expired")]
    Expired,

    /// Token is malformed, has a bad signature, or otherwise failed validation
    #[error("Invalid token: {0}")]
    Invalid(String),
}

/// Token claims
///
/// # Claims
///
/// - `id`: subject user ID
/// - `username`: username at issue time
/// - `role`: role at issue time (re-checked against the directory on every
///   authenticated request, so a stale claim never grants elevated access)
/// - `iat`: issued at (Unix timestamp)
/// - `exp`: expiration time (Unix timestamp)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject user ID
    pub id: i64,

    /// Username
    pub username: String,

    /// Role at issue time
    pub role: Role,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Creates new claims expiring `lifetime` from now
    ///
    /// `iat` is always the current timestamp, so two tokens issued for the
    /// same identity are never byte-identical across seconds.
    pub fn new(id: i64, username: &str, role: Role, lifetime: Duration) -> Self {
        let now = Utc::now();

        Self {
            id,
            username: username.to_string(),
            role,
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
        }
    }

    /// Default token lifetime (1 hour)
    pub fn default_lifetime() -> Duration {
        Duration::hours(1)
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Creates a signed token from claims
///
/// Signs the token using HS256 (HMAC-SHA256) with the provided secret.
///
/// # Security
///
/// The secret should be:
/// - At least 32 bytes (256 bits) for HS256
/// - Randomly generated and stored securely (environment variable or secret
///   manager)
///
/// # Errors
///
/// Returns `JwtError::CreateError` if token encoding fails
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &key)
        .map_err(|e| JwtError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Validates a token and extracts its claims
///
/// Verifies:
/// - Signature is valid
/// - Structure is well-formed
/// - Token hasn't expired
///
/// # Errors
///
/// Returns `JwtError::Expired` for an expired token and `JwtError::Invalid`
/// for every other failure (bad signature, altered payload, malformed
/// structure).
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
        _ => JwtError::Invalid(format!("Token validation failed: {}", e)),
    })?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    #[test]
    fn test_claims_creation() {
        let claims = Claims::new(7, "alice", Role::User, Claims::default_lifetime());

        assert_eq!(claims.id, 7);
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.role, Role::User);
        assert!(!claims.is_expired());
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_create_and_validate_token() {
        let claims = Claims::new(42, "alice", Role::Admin, Claims::default_lifetime());
        let token = create_token(&claims, SECRET).expect("Should create token");

        let validated = validate_token(&token, SECRET).expect("Should validate token");
        assert_eq!(validated.id, 42);
        assert_eq!(validated.username, "alice");
        assert_eq!(validated.role, Role::Admin);
    }

    #[test]
    fn test_tokens_are_never_identical() {
        let c1 = Claims::new(1, "alice", Role::User, Duration::hours(1));
        let c2 = Claims::new(1, "alice", Role::User, Duration::hours(2));

        let t1 = create_token(&c1, SECRET).unwrap();
        let t2 = create_token(&c2, SECRET).unwrap();

        assert_ne!(t1, t2);
    }

    #[test]
    fn test_validate_with_wrong_secret() {
        let claims = Claims::new(1, "alice", Role::User, Claims::default_lifetime());
        let token = create_token(&claims, "secret-number-one-32-bytes-long!").unwrap();

        let result = validate_token(&token, "a-completely-different-secret-key");
        assert!(matches!(result, Err(JwtError::Invalid(_))));
    }

    #[test]
    fn test_validate_expired_token() {
        // Expired an hour ago, well past any validation leeway
        let claims = Claims::new(1, "alice", Role::User, Duration::seconds(-3600));
        assert!(claims.is_expired());

        let token = create_token(&claims, SECRET).unwrap();
        let result = validate_token(&token, SECRET);

        assert!(matches!(result, Err(JwtError::Expired)));
    }

    #[test]
    fn test_validate_tampered_payload() {
        let claims = Claims::new(1, "alice", Role::User, Claims::default_lifetime());
        let token = create_token(&claims, SECRET).unwrap();

        // Flip one character inside the payload segment
        let mut parts: Vec<String> = token.split('.').map(String::from).collect();
        assert_eq!(parts.len(), 3);
        let payload = &mut parts[1];
        let mid = payload.len() / 2;
        let original = payload.as_bytes()[mid];
        let replacement = if original == b'A' { b'B' } else { b'A' };
        payload.replace_range(mid..mid + 1, std::str::from_utf8(&[replacement]).unwrap());
        let tampered = parts.join(".");

        assert!(validate_token(&tampered, SECRET).is_err());
    }

    #[test]
    fn test_validate_tampered_signature() {
        let claims = Claims::new(1, "alice", Role::User, Claims::default_lifetime());
        let token = create_token(&claims, SECRET).unwrap();

        let mut parts: Vec<String> = token.split('.').map(String::from).collect();
        let sig = &mut parts[2];
        let original = sig.as_bytes()[0];
        let replacement = if original == b'A' { b'B' } else { b'A' };
        sig.replace_range(0..1, std::str::from_utf8(&[replacement]).unwrap());
        let tampered = parts.join(".");

        assert!(matches!(
            validate_token(&tampered, SECRET),
            Err(JwtError::Invalid(_))
        ));
    }

    #[test]
    fn test_validate_malformed_token() {
        assert!(validate_token("not-a-token", SECRET).is_err());
        assert!(validate_token("", SECRET).is_err());
        assert!(validate_token("a.b", SECRET).is_err());
    }
}
