use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use shopfront_core::AppError;
use shopfront_models::CategoryId;

use super::model::{Category, CreateCategoryDto, UpdateCategoryDto};
use super::service::CategoryService;
use crate::middleware::auth::{AdminUser, AuthUser};
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedPath};

/// Create a category (admin only)
#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CreateCategoryDto,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin role required", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
#[instrument(skip(state, _admin, dto))]
pub async fn create_category(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidatedJson(dto): ValidatedJson<CreateCategoryDto>,
) -> Result<(StatusCode, Json<Category>), AppError> {
    let category = CategoryService::create_category(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// List categories
#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "All categories", body = Vec<Category>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_categories(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> Result<Json<Vec<Category>>, AppError> {
    Ok(Json(CategoryService::get_categories(&state.db).await?))
}

/// Get a category by id
#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    params(("id" = String, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category", body = Category),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Category not found", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_category(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    ValidatedPath(id): ValidatedPath<CategoryId>,
) -> Result<Json<Category>, AppError> {
    Ok(Json(CategoryService::get_category(&state.db, id).await?))
}

/// Replace a category (admin only)
#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    params(("id" = String, Path, description = "Category ID")),
    request_body = UpdateCategoryDto,
    responses(
        (status = 200, description = "Category updated", body = Category),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin role required", body = ErrorResponse),
        (status = 404, description = "Category not found", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
#[instrument(skip(state, _admin, dto))]
pub async fn update_category(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidatedPath(id): ValidatedPath<CategoryId>,
    ValidatedJson(dto): ValidatedJson<UpdateCategoryDto>,
) -> Result<Json<Category>, AppError> {
    Ok(Json(CategoryService::update_category(&state.db, id, dto).await?))
}

/// Delete a category (admin only)
#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    params(("id" = String, Path, description = "Category ID")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 403, description = "Forbidden - admin role required", body = ErrorResponse),
        (status = 404, description = "Category not found", body = ErrorResponse),
        (status = 409, description = "Category still has products", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
#[instrument(skip(state, _admin))]
pub async fn delete_category(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidatedPath(id): ValidatedPath<CategoryId>,
) -> Result<StatusCode, AppError> {
    CategoryService::delete_category(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
