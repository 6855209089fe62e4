use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use shopfront_core::AppError;
use shopfront_models::{ProductId, ReviewId};

use super::model::{CreateReviewDto, Review};
use super::service::ReviewService;
use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedPath};

/// List a product's reviews
#[utoipa::path(
    get,
    path = "/api/products/{id}/reviews",
    params(("id" = String, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Reviews, newest first", body = Vec<Review>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Reviews"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_product_reviews(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    ValidatedPath(product_id): ValidatedPath<ProductId>,
) -> Result<Json<Vec<Review>>, AppError> {
    Ok(Json(
        ReviewService::get_product_reviews(&state.db, product_id).await?,
    ))
}

/// Review a product as the caller
#[utoipa::path(
    post,
    path = "/api/products/{id}/reviews",
    params(("id" = String, Path, description = "Product ID")),
    request_body = CreateReviewDto,
    responses(
        (status = 201, description = "Review created", body = Review),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Reviews"
)]
#[instrument(skip(state, auth_user, dto), fields(user.id = %auth_user.0.sub))]
pub async fn create_review(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedPath(product_id): ValidatedPath<ProductId>,
    ValidatedJson(dto): ValidatedJson<CreateReviewDto>,
) -> Result<(StatusCode, Json<Review>), AppError> {
    let user_id = auth_user.user_id()?;
    let review = ReviewService::create_review(&state.db, product_id, user_id, dto).await?;
    Ok((StatusCode::CREATED, Json(review)))
}

/// Delete a review (author or admin)
#[utoipa::path(
    delete,
    path = "/api/reviews/{id}",
    params(("id" = String, Path, description = "Review ID")),
    responses(
        (status = 204, description = "Review deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not the author", body = ErrorResponse),
        (status = 404, description = "Review not found", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Reviews"
)]
#[instrument(skip(state, auth_user), fields(user.id = %auth_user.0.sub))]
pub async fn delete_review(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedPath(id): ValidatedPath<ReviewId>,
) -> Result<StatusCode, AppError> {
    let user_id = auth_user.user_id()?;
    ReviewService::delete_review(&state.db, id, user_id, auth_user.is_admin()).await?;
    Ok(StatusCode::NO_CONTENT)
}
