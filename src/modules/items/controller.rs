use axum::{Json, extract::State, http::StatusCode};
use tracing::{info, instrument};

use shopfront_core::AppError;
use shopfront_models::MessageResponse;

use super::model::{CreateItemDto, Item, UpdateItemDto};
use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedPath};

/// Store an item, replacing any item with the same id
#[utoipa::path(
    post,
    path = "/api/items",
    request_body = CreateItemDto,
    responses(
        (status = 201, description = "Item stored", body = Item),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Items"
)]
#[instrument(skip(state, _auth_user, dto))]
pub async fn create_item(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateItemDto>,
) -> Result<(StatusCode, Json<Item>), AppError> {
    let item = state.items.upsert(dto.id, dto.name).await;
    info!(item.id = %item.id, "Item created");
    Ok((StatusCode::CREATED, Json(item)))
}

#[utoipa::path(
    get,
    path = "/api/items/{id}",
    params(("id" = String, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Item", body = Item),
        (status = 404, description = "Item not found", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Items"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_item(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    ValidatedPath(id): ValidatedPath<String>,
) -> Result<Json<Item>, AppError> {
    Ok(Json(state.items.get(&id).await?))
}

#[utoipa::path(
    put,
    path = "/api/items/{id}",
    params(("id" = String, Path, description = "Item ID")),
    request_body = UpdateItemDto,
    responses(
        (status = 200, description = "Item updated", body = Item),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 404, description = "Item not found", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Items"
)]
#[instrument(skip(state, _auth_user, dto))]
pub async fn update_item(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    ValidatedPath(id): ValidatedPath<String>,
    ValidatedJson(dto): ValidatedJson<UpdateItemDto>,
) -> Result<Json<Item>, AppError> {
    Ok(Json(state.items.update(&id, dto.name).await?))
}

#[utoipa::path(
    delete,
    path = "/api/items/{id}",
    params(("id" = String, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Item deleted", body = MessageResponse),
        (status = 404, description = "Item not found", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Items"
)]
#[instrument(skip(state, _auth_user))]
pub async fn delete_item(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    ValidatedPath(id): ValidatedPath<String>,
) -> Result<Json<MessageResponse>, AppError> {
    state.items.remove(&id).await?;
    info!(item.id = %id, "Item deleted");
    Ok(Json(MessageResponse {
        message: "Item deleted".to_string(),
    }))
}
