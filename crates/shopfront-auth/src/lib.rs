//! # Shopfront Auth
//!
//! Token issuance, token verification and the role gate:
//!
//! - [`claims`]: the [`Claims`] carried by access tokens
//! - [`jwt`]: HS256 issuance and verification
//! - [`role`]: exact-match role checks
//!
//! ```ignore
//! use shopfront_auth::{ROLE_ADMIN, create_access_token, require_role, verify_token};
//!
//! let token = create_access_token(user_id, "alice", ROLE_ADMIN, &jwt_config)?;
//! let claims = verify_token(&token, &jwt_config)?;
//! require_role(&claims, ROLE_ADMIN)?;
//! ```

pub mod claims;
pub mod jwt;
pub mod role;

pub use claims::Claims;
pub use jwt::{TOKEN_TYPE, create_access_token, verify_token};
pub use role::{
    ROLE_ADMIN, ROLE_USER, has_role, is_admin, require_owner_or_admin, require_role,
};
