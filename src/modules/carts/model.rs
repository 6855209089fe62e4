pub use shopfront_models::carts::*;
