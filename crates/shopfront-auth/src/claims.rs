//! Access token claims.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use shopfront_core::AppError;

/// Claims carried by every access token.
///
/// Identity and role travel inside the token, so authenticated requests
/// need no database lookup to know who is calling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    pub username: String,
    /// Role name, compared verbatim by the role gate
    pub role: String,
    /// Issued-at (Unix timestamp)
    pub iat: usize,
    /// Expiry (Unix timestamp)
    pub exp: usize,
}

impl Claims {
    pub fn user_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.sub).map_err(|_| AppError::unauthorized("Invalid token subject"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(sub: &str) -> Claims {
        Claims {
            sub: sub.to_string(),
            username: "alice".to_string(),
            role: "user".to_string(),
            iat: 0,
            exp: 3600,
        }
    }

    #[test]
    fn test_user_id_parses_subject() {
        let id = Uuid::new_v4();
        assert_eq!(claims(&id.to_string()).user_id().unwrap(), id);
    }

    #[test]
    fn test_non_uuid_subject_is_unauthorized() {
        let err = claims("42").user_id().unwrap_err();
        assert_eq!(err.status.as_u16(), 401);
    }

    #[test]
    fn test_claims_json_shape() {
        let json = serde_json::to_value(claims("abc")).unwrap();
        assert_eq!(json["sub"], "abc");
        assert_eq!(json["role"], "user");
        assert!(json.get("exp").is_some());
        assert!(json.get("iat").is_some());
    }
}
