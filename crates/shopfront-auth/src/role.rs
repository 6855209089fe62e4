//! Exact-match role gate.
//!
//! Roles are compared with case-sensitive string equality. There is no
//! hierarchy: `admin` does not imply `user`.

use shopfront_core::AppError;
use uuid::Uuid;

use crate::claims::Claims;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";

pub fn has_role(claims: &Claims, required: &str) -> bool {
    claims.role == required
}

pub fn is_admin(claims: &Claims) -> bool {
    has_role(claims, ROLE_ADMIN)
}

/// 403 unless the caller's role equals `required`.
pub fn require_role(claims: &Claims, required: &str) -> Result<(), AppError> {
    if has_role(claims, required) {
        Ok(())
    } else {
        tracing::warn!(
            user_id = %claims.sub,
            role = %claims.role,
            required_role = %required,
            "Role check failed"
        );
        Err(AppError::forbidden("Access forbidden"))
    }
}

/// 403 unless the caller owns the resource or is an admin.
pub fn require_owner_or_admin(claims: &Claims, owner_id: Uuid) -> Result<(), AppError> {
    if is_admin(claims) || claims.sub == owner_id.to_string() {
        Ok(())
    } else {
        Err(AppError::forbidden("Access forbidden"))
    }
}
