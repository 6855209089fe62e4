//! User models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use shopfront_core::serde::deserialize_optional_trimmed;
use shopfront_core::{PaginationMeta, PaginationParams};

use crate::ids::{RoleId, UserId};

/// A user as returned by the API. The password hash never leaves the
/// database layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    /// Role name
    pub role: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Row used by login: identity plus the stored hash.
#[derive(Debug, Clone, FromRow)]
pub struct UserCredentials {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role_id: RoleId,
    pub role: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<UserCredentials> for User {
    fn from(row: UserCredentials) -> Self {
        Self {
            id: row.id,
            username: row.username,
            email: row.email,
            role: row.role,
            created_at: row.created_at,
        }
    }
}

/// Registration payload. New users always get the `user` role.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUserDto {
    #[validate(length(min = 3, max = 100, message = "username must be 3-100 characters"))]
    #[schema(example = "alice")]
    pub username: String,
    #[validate(email(message = "email must be a valid email address"))]
    #[schema(example = "alice@example.com")]
    pub email: String,
    #[validate(length(min = 8, max = 128, message = "password must be 8-128 characters"))]
    #[schema(example = "password123")]
    pub password: String,
}

/// Admin update. Every field is overwritten.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateUserDto {
    #[validate(length(min = 3, max = 100, message = "username must be 3-100 characters"))]
    pub username: String,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    /// Role name, e.g. `admin` or `user`
    #[validate(length(min = 1, max = 50, message = "role must be 1-50 characters"))]
    pub role: String,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserFilterParams {
    /// Case-insensitive substring match on username
    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    pub username: Option<String>,
    /// Exact role name
    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    pub role: Option<String>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedUsersResponse {
    pub data: Vec<User>,
    pub meta: PaginationMeta,
}
