use axum::{Router, routing::get};

use super::controller::{
    create_product, delete_product, get_product, get_products, update_product,
};
use crate::modules::reviews::controller::{create_review, get_product_reviews};
use crate::state::AppState;

pub fn init_products_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/{id}/reviews", get(get_product_reviews).post(create_review))
}
