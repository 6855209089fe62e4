use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{create_item, delete_item, get_item, update_item};
use crate::state::AppState;

pub fn init_items_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_item))
        .route("/{id}", get(get_item).put(update_item).delete(delete_item))
}
