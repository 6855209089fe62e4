use axum::{Router, routing::delete};

use super::controller::delete_review;
use crate::state::AppState;

/// Review routes not scoped under a product. Listing and creation live on
/// the products router at `/{id}/reviews`.
pub fn init_reviews_router() -> Router<AppState> {
    Router::new().route("/{id}", delete(delete_review))
}
