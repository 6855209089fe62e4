//! # Shopfront Core
//!
//! Foundational types shared by every shopfront crate:
//!
//! - [`errors`]: [`AppError`] and its HTTP response conversion
//! - [`pagination`]: `limit` / `offset` / `page` query handling
//! - [`password`]: bcrypt password hashing
//! - [`serde`]: query-string deserialization helpers
//!
//! ```ignore
//! use shopfront_core::{AppError, hash_password, verify_password};
//!
//! let hash = hash_password("secure_password")?;
//! if !verify_password("guess", &hash) {
//!     return Err(AppError::unauthorized("Invalid username or password"));
//! }
//! ```

pub mod errors;
pub mod pagination;
pub mod password;
pub mod serde;

pub use errors::AppError;
pub use pagination::{PaginationMeta, PaginationParams};
pub use password::{hash_password, verify_password, verify_password_for_unknown_user};
