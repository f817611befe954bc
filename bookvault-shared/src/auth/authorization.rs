/// Ownership checks for mutating operations
///
/// BookVault uses a single-owner model: a resource may be mutated only by
/// the user recorded as its owner. There is no role-based override: an
/// admin editing another user's book is denied like anyone else. Callers
/// invoke [`require_ownership`] after authenticating and before committing
/// any mutation.

use super::service::AuthenticatedIdentity;

/// Error type for authorization checks
#[derive(Debug, thiserror::Error)]
pub enum AuthzError {
    /// Authenticated, but not the owner of the resource
    #[error("You do not have permission to modify this resource")]
    NotOwner,
}

/// Checks that the authenticated identity owns a resource
///
/// Allows iff `identity.id == resource_owner_id`.
///
/// # Errors
///
/// Returns [`AuthzError::NotOwner`] otherwise; callers must not proceed
/// with the mutation.
pub fn require_ownership(
    identity: &AuthenticatedIdentity,
    resource_owner_id: i64,
) -> Result<(), AuthzError> {
    if identity.id != resource_owner_id {
        return Err(AuthzError::NotOwner);
    }

    Ok(())
}
