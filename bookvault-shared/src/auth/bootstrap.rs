/// Root-admin bootstrap
///
/// Ensures exactly one privileged account exists after process start. The
/// seed password goes through the normal hashed-creation path and is never
/// stored in plaintext. The function is idempotent and safe under concurrent
/// process starts: if two instances race, the loser's create is rejected by
/// the directory's uniqueness constraint and treated as "already exists".

use tracing::{debug, info};

use super::password::{self, PasswordError};
use crate::directory::{DirectoryError, UserDirectory};
use crate::models::user::Role;

/// Error type for bootstrap
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    /// Seed password could not be hashed
    #[error(transparent)]
    Password(#[from] PasswordError),

    /// Directory failure other than a uniqueness conflict
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

/// Ensures the root-admin account exists
///
/// No-op when an account with the reserved username is already present.
/// Invoked once per process start, before the server accepts requests.
pub async fn ensure_root_admin(
    directory: &dyn UserDirectory,
    username: &str,
    seed_password: &str,
) -> Result<(), BootstrapError> {
    if directory.find_by_username(username, false).await?.is_some() {
        debug!(username, "root admin already exists");
        return Ok(());
    }

    let password_hash = password::hash_password(seed_password)?;

    match directory.create_user(username, &password_hash, Role::Admin).await {
        Ok(user) => {
            info!(username, user_id = user.id, "root admin created");
            Ok(())
        }
        // Lost a race with another instance; the account exists now
        Err(DirectoryError::Conflict) => {
            debug!(username, "root admin created concurrently");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
