pub use shopfront_models::auth::{AdminResponse, MeResponse};
