pub use shopfront_models::roles::*;
