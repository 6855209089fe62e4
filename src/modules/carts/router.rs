use axum::{
    Router,
    routing::{get, post, put},
};

use super::controller::{
    add_cart_item, clear_cart, get_cart, remove_cart_item, update_cart_item,
};
use crate::state::AppState;

pub fn init_cart_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_cart).delete(clear_cart))
        .route("/items", post(add_cart_item))
        .route("/items/{id}", put(update_cart_item).delete(remove_cart_item))
}
