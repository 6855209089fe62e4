pub use shopfront_models::auth::*;
pub use shopfront_models::users::{CreateUserDto as RegisterRequestDto, User, UserCredentials};
