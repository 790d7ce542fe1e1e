//! Single-owner access control for contacts.

use tracing::warn;

use crate::auth::repo_types::User;
use crate::error::AppError;

/// Permit iff the caller owns the resource.
pub fn authorize(caller: &User, owner_id: i64) -> bool {
    caller.id == owner_id
}

/// `authorize`, reported as `Forbidden` on mismatch.
pub fn ensure_owner(caller: &User, owner_id: i64) -> Result<(), AppError> {
    if authorize(caller, owner_id) {
        Ok(())
    } else {
        warn!(user_id = caller.id, owner_id, "access denied: not the owner");
        Err(AppError::Forbidden)
    }
}
