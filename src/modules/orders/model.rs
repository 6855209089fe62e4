pub use shopfront_models::orders::*;
