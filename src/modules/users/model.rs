pub use shopfront_models::users::*;
