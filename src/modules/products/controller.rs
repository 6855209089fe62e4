use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use tracing::instrument;

use shopfront_core::AppError;
use shopfront_models::ProductId;

use super::model::{
    CreateProductDto, PaginatedProductsResponse, Product, ProductFilterParams, UpdateProductDto,
};
use super::service::ProductService;
use crate::middleware::auth::{AdminUser, AuthUser};
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedPath};

/// Create a product (admin only)
#[utoipa::path(
    post,
    path = "/api/products",
    request_body = CreateProductDto,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, description = "Validation error or unknown category", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin role required", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
#[instrument(skip(state, _admin, dto))]
pub async fn create_product(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidatedJson(dto): ValidatedJson<CreateProductDto>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    let product = ProductService::create_product(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// List products, filtered by category and name
#[utoipa::path(
    get,
    path = "/api/products",
    params(ProductFilterParams),
    responses(
        (status = 200, description = "Paginated products", body = PaginatedProductsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_products(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(filters): Query<ProductFilterParams>,
) -> Result<Json<PaginatedProductsResponse>, AppError> {
    Ok(Json(ProductService::get_products(&state.db, filters).await?))
}

/// Get a product by id
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(("id" = String, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product", body = Product),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_product(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    ValidatedPath(id): ValidatedPath<ProductId>,
) -> Result<Json<Product>, AppError> {
    Ok(Json(ProductService::get_product(&state.db, id).await?))
}

/// Replace a product (admin only)
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(("id" = String, Path, description = "Product ID")),
    request_body = UpdateProductDto,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 400, description = "Validation error or unknown category", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin role required", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
#[instrument(skip(state, _admin, dto))]
pub async fn update_product(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidatedPath(id): ValidatedPath<ProductId>,
    ValidatedJson(dto): ValidatedJson<UpdateProductDto>,
) -> Result<Json<Product>, AppError> {
    Ok(Json(ProductService::update_product(&state.db, id, dto).await?))
}

/// Delete a product (admin only)
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(("id" = String, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 403, description = "Forbidden - admin role required", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
        (status = 409, description = "Product has been ordered", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
#[instrument(skip(state, _admin))]
pub async fn delete_product(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidatedPath(id): ValidatedPath<ProductId>,
) -> Result<StatusCode, AppError> {
    ProductService::delete_product(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
