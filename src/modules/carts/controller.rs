use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use shopfront_core::AppError;
use shopfront_models::CartItemId;

use super::model::{AddCartItemDto, CartItem, CartResponse, UpdateCartItemDto};
use super::service::CartService;
use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedPath};

/// Get the caller's cart
#[utoipa::path(
    get,
    path = "/api/cart",
    responses(
        (status = 200, description = "Cart with priced lines", body = CartResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
#[instrument(skip(state, auth_user), fields(user.id = %auth_user.0.sub))]
pub async fn get_cart(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<CartResponse>, AppError> {
    let user_id = auth_user.user_id()?;
    Ok(Json(CartService::get_cart(&state.db, user_id).await?))
}

/// Empty the caller's cart
#[utoipa::path(
    delete,
    path = "/api/cart",
    responses(
        (status = 204, description = "Cart emptied"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
#[instrument(skip(state, auth_user), fields(user.id = %auth_user.0.sub))]
pub async fn clear_cart(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<StatusCode, AppError> {
    let user_id = auth_user.user_id()?;
    CartService::clear_cart(&state.db, user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Add a product to the caller's cart
#[utoipa::path(
    post,
    path = "/api/cart/items",
    request_body = AddCartItemDto,
    responses(
        (status = 201, description = "Item added", body = CartItem),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
#[instrument(skip(state, auth_user, dto), fields(user.id = %auth_user.0.sub))]
pub async fn add_cart_item(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<AddCartItemDto>,
) -> Result<(StatusCode, Json<CartItem>), AppError> {
    let user_id = auth_user.user_id()?;
    let item = CartService::add_item(&state.db, user_id, dto).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Set the quantity of a cart line
#[utoipa::path(
    put,
    path = "/api/cart/items/{id}",
    params(("id" = String, Path, description = "Cart item ID")),
    request_body = UpdateCartItemDto,
    responses(
        (status = 200, description = "Item updated", body = CartItem),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 404, description = "Not in the caller's cart", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
#[instrument(skip(state, auth_user, dto), fields(user.id = %auth_user.0.sub))]
pub async fn update_cart_item(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedPath(id): ValidatedPath<CartItemId>,
    ValidatedJson(dto): ValidatedJson<UpdateCartItemDto>,
) -> Result<Json<CartItem>, AppError> {
    let user_id = auth_user.user_id()?;
    Ok(Json(CartService::update_item(&state.db, user_id, id, dto).await?))
}

/// Remove a line from the caller's cart
#[utoipa::path(
    delete,
    path = "/api/cart/items/{id}",
    params(("id" = String, Path, description = "Cart item ID")),
    responses(
        (status = 204, description = "Item removed"),
        (status = 404, description = "Not in the caller's cart", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
#[instrument(skip(state, auth_user), fields(user.id = %auth_user.0.sub))]
pub async fn remove_cart_item(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedPath(id): ValidatedPath<CartItemId>,
) -> Result<StatusCode, AppError> {
    let user_id = auth_user.user_id()?;
    CartService::remove_item(&state.db, user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
