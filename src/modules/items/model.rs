pub use shopfront_models::items::*;
