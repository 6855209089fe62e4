pub use shopfront_models::tasks::*;
