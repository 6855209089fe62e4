pub use shopfront_models::catalog::{Category, CreateCategoryDto, UpdateCategoryDto};
