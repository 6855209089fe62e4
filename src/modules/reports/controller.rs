use axum::{Json, extract::State};
use tracing::instrument;

use shopfront_core::AppError;

use super::model::{ProductSales, SalesSummary};
use super::service::ReportService;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;

/// Per-product sales (admin only)
#[utoipa::path(
    get,
    path = "/api/reports/sales",
    responses(
        (status = 200, description = "Units sold and revenue per product", body = Vec<ProductSales>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin role required", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Reports"
)]
#[instrument(skip(state))]
pub async fn sales_report(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductSales>>, AppError> {
    Ok(Json(ReportService::sales_by_product(&state.db).await?))
}

/// Row counts (admin only)
#[utoipa::path(
    get,
    path = "/api/reports/summary",
    responses(
        (status = 200, description = "Users, products, categories and orders", body = SalesSummary),
        (status = 403, description = "Forbidden - admin role required", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Reports"
)]
#[instrument(skip(state))]
pub async fn summary_report(State(state): State<AppState>) -> Result<Json<SalesSummary>, AppError> {
    Ok(Json(ReportService::summary(&state.db).await?))
}
