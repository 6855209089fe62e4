//! Token issuance and verification.
//!
//! Tokens are HS256-signed over the configured secret. Verification pins the
//! algorithm to HS256, so a token whose header names any other algorithm
//! (including `none`) is rejected before its signature is looked at.
//!
//! ```ignore
//! use shopfront_auth::{create_access_token, verify_token};
//! use shopfront_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(user_id, "alice", "admin", &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.role, "admin");
//! ```

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use tracing::debug;
use uuid::Uuid;

use shopfront_config::JwtConfig;
use shopfront_core::AppError;

use crate::claims::Claims;

pub const TOKEN_TYPE: &str = "Bearer";

fn validation(jwt_config: &JwtConfig) -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = jwt_config.leeway;
    validation
}

/// Issues an access token valid for `jwt_config.access_token_expiry` seconds.
pub fn create_access_token(
    user_id: Uuid,
    username: &str,
    role: &str,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp().max(0) as usize;
    let exp = now + jwt_config.access_token_expiry.max(0) as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        username: username.to_string(),
        role: role.to_string(),
        iat: now,
        exp,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {e}")))
}

/// Verifies signature, algorithm and expiry.
///
/// # Errors
///
/// 401 when the token is malformed, signed with another key or algorithm,
/// or expired.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation(jwt_config),
    )
    .map(|data| data.claims)
    .map_err(|e| {
        debug!(error = %e, "Token rejected");
        AppError::unauthorized("Invalid or expired token")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_test_jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            access_token_expiry: 3600,
            leeway: 0,
        }
    }

    fn sign(claims: &Claims, algorithm: Algorithm, secret: &str) -> String {
        encode(
            &Header::new(algorithm),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn claims_expiring_at(exp: usize) -> Claims {
        Claims {
            sub: Uuid::new_v4().to_string(),
            username: "alice".to_string(),
            role: "user".to_string(),
            iat: exp.saturating_sub(3600),
            exp,
        }
    }

    #[test]
    fn test_issued_role_survives_verification() {
        let config = get_test_jwt_config();
        let user_id = Uuid::new_v4();

        let token = create_access_token(user_id, "alice", "admin", &config).unwrap();
        let claims = verify_token(&token, &config).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.role, "admin");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_expired_token_rejected() {
        let config = get_test_jwt_config();
        let past = (Utc::now().timestamp() - 10) as usize;
        let token = sign(&claims_expiring_at(past), Algorithm::HS256, &config.secret);

        let err = verify_token(&token, &config).unwrap_err();
        assert_eq!(err.status.as_u16(), 401);
    }

    #[test]
    fn test_leeway_tolerates_recent_expiry() {
        let mut config = get_test_jwt_config();
        config.leeway = 60;
        let past = (Utc::now().timestamp() - 10) as usize;
        let token = sign(&claims_expiring_at(past), Algorithm::HS256, &config.secret);

        assert!(verify_token(&token, &config).is_ok());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let config = get_test_jwt_config();
        let token = create_access_token(Uuid::new_v4(), "alice", "user", &config).unwrap();

        let wrong_config = JwtConfig {
            secret: "different-secret-key-at-least-32-characters".to_string(),
            ..get_test_jwt_config()
        };

        assert!(verify_token(&token, &wrong_config).is_err());
    }

    #[test]
    fn test_other_hmac_algorithm_rejected() {
        let config = get_test_jwt_config();
        let future = (Utc::now().timestamp() + 3600) as usize;
        let token = sign(&claims_expiring_at(future), Algorithm::HS512, &config.secret);

        assert!(verify_token(&token, &config).is_err());
    }

    #[test]
    fn test_unsigned_token_rejected() {
        let config = get_test_jwt_config();
        // {"alg":"none","typ":"JWT"}.{"sub":"x"}.
        let token = "eyJhbGciOiJub25lIiwidHlwIjoiSldUIn0.eyJzdWIiOiJ4In0.";
        assert!(verify_token(token, &config).is_err());
    }

    #[test]
    fn test_malformed_token_rejected() {
        let config = get_test_jwt_config();
        assert!(verify_token("invalid-token", &config).is_err());
        assert!(verify_token("", &config).is_err());
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let config = get_test_jwt_config();
        let token = create_access_token(Uuid::new_v4(), "alice", "user", &config).unwrap();
        let admin = create_access_token(Uuid::new_v4(), "mallory", "admin", &config).unwrap();

        let parts: Vec<&str> = token.split('.').collect();
        let admin_parts: Vec<&str> = admin.split('.').collect();
        let forged = format!("{}.{}.{}", parts[0], admin_parts[1], parts[2]);

        assert!(verify_token(&forged, &config).is_err());
    }
}
