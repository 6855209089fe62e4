pub use shopfront_models::reports::*;
