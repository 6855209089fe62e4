use axum::{
    Router,
    routing::{get, put},
};

use super::controller::{
    create_order, delete_order, get_order, get_orders, update_order_status,
};
use crate::state::AppState;

pub fn init_orders_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_orders).post(create_order))
        .route("/{id}", get(get_order).delete(delete_order))
        .route("/{id}/status", put(update_order_status))
}
