/// Authentication and authorization utilities
///
/// This module provides the security core of BookVault:
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`jwt`]: signed token generation and validation
/// - [`service`]: credential validation, token issuance, and per-request
///   token authentication against the user directory
/// - [`authorization`]: ownership checks for mutating operations
/// - [`bootstrap`]: idempotent root-admin account creation at startup
///
/// # Security Features
///
/// - **Password Hashing**: Argon2id with 64 MB memory, 3 iterations
/// - **Tokens**: HS256 signing with configurable expiration (default 1 hour)
/// - **Constant-time Comparison**: password verification never branches on
///   secret material
/// - **No enumeration signal**: unknown usernames and wrong passwords are
///   indistinguishable to callers
///
/// # Example
///
/// ```no_run
/// use bookvault_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash));
/// # Ok(())
/// # }
/// ```

pub mod authorization;
pub mod bootstrap;
pub mod jwt;
pub mod password;
pub mod service;
