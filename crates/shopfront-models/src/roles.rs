//! Role models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::RoleId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateRoleDto {
    #[validate(length(min = 1, max = 50, message = "name must be 1-50 characters"))]
    #[schema(example = "support")]
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_name_bounds() {
        assert!(CreateRoleDto { name: "support".into() }.validate().is_ok());
        assert!(CreateRoleDto { name: String::new() }.validate().is_err());
        assert!(CreateRoleDto { name: "x".repeat(51) }.validate().is_err());
    }
}
