use axum::Json;
use tracing::instrument;

use super::model::{AdminResponse, MeResponse};
use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;

/// Admin landing endpoint
#[utoipa::path(
    get,
    path = "/api/admin",
    responses(
        (status = 200, description = "Caller is an admin", body = AdminResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin role required", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip_all, fields(user.id = %auth_user.0.sub))]
pub async fn admin_dashboard(auth_user: AuthUser) -> Json<AdminResponse> {
    Json(AdminResponse {
        message: "Welcome Admin!".to_string(),
        identity: MeResponse::from(auth_user.0),
    })
}
