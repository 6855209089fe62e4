use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use shopfront_auth::require_owner_or_admin;
use shopfront_core::AppError;
use shopfront_models::OrderId;

use super::model::{CreateOrderDto, Order, OrderWithItems, UpdateOrderStatusDto};
use super::service::OrderService;
use crate::middleware::auth::{AdminUser, AuthUser};
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedPath};

/// Place an order for the caller
#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = CreateOrderDto,
    responses(
        (status = 201, description = "Order placed", body = OrderWithItems),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
        (status = 409, description = "Insufficient stock", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
#[instrument(skip(state, auth_user, dto), fields(user.id = %auth_user.0.sub))]
pub async fn create_order(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateOrderDto>,
) -> Result<(StatusCode, Json<OrderWithItems>), AppError> {
    let user_id = auth_user.user_id()?;
    let order = OrderService::create_order(&state.db, user_id, dto).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// List orders: the caller's own, or every order for admins
#[utoipa::path(
    get,
    path = "/api/orders",
    responses(
        (status = 200, description = "Orders, newest first", body = Vec<Order>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
#[instrument(skip(state, auth_user), fields(user.id = %auth_user.0.sub))]
pub async fn get_orders(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<Order>>, AppError> {
    let user_id = auth_user.user_id()?;
    Ok(Json(
        OrderService::get_orders(&state.db, user_id, auth_user.is_admin()).await?,
    ))
}

/// Get an order with its items (owner or admin)
#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    params(("id" = String, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order with items", body = OrderWithItems),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not the caller's order", body = ErrorResponse),
        (status = 404, description = "Order not found", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
#[instrument(skip(state, auth_user), fields(user.id = %auth_user.0.sub))]
pub async fn get_order(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedPath(id): ValidatedPath<OrderId>,
) -> Result<Json<OrderWithItems>, AppError> {
    let order = OrderService::get_order(&state.db, id).await?;
    require_owner_or_admin(&auth_user.0, order.order.user_id.into_inner())?;
    Ok(Json(order))
}

/// Change an order's status (admin only)
#[utoipa::path(
    put,
    path = "/api/orders/{id}/status",
    params(("id" = String, Path, description = "Order ID")),
    request_body = UpdateOrderStatusDto,
    responses(
        (status = 200, description = "Status updated", body = Order),
        (status = 400, description = "Unknown status", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin role required", body = ErrorResponse),
        (status = 404, description = "Order not found", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
#[instrument(skip(state, _admin, dto))]
pub async fn update_order_status(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidatedPath(id): ValidatedPath<OrderId>,
    ValidatedJson(dto): ValidatedJson<UpdateOrderStatusDto>,
) -> Result<Json<Order>, AppError> {
    Ok(Json(
        OrderService::update_status(&state.db, id, dto.status).await?,
    ))
}

/// Delete an order and its items (admin only)
#[utoipa::path(
    delete,
    path = "/api/orders/{id}",
    params(("id" = String, Path, description = "Order ID")),
    responses(
        (status = 204, description = "Order deleted"),
        (status = 403, description = "Forbidden - admin role required", body = ErrorResponse),
        (status = 404, description = "Order not found", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
#[instrument(skip(state, _admin))]
pub async fn delete_order(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidatedPath(id): ValidatedPath<OrderId>,
) -> Result<StatusCode, AppError> {
    OrderService::delete_order(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
