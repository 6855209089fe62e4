pub use shopfront_models::catalog::{
    CreateProductDto, PaginatedProductsResponse, Product, ProductFilterParams, UpdateProductDto,
};
