pub use shopfront_models::reviews::*;
