use axum::http::{HeaderValue, Method, header};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use shopfront_observability::{logging_middleware, metrics_middleware};

use crate::docs::ApiDoc;
use crate::middleware::auth::require_auth;
use crate::middleware::role::require_admin;
use crate::middleware::security_headers::security_headers;
use crate::modules::admin::router::init_admin_router;
use crate::modules::auth::router::init_auth_router;
use crate::modules::carts::router::init_cart_router;
use crate::modules::categories::router::init_categories_router;
use crate::modules::health::router::init_health_router;
use crate::modules::items::router::init_items_router;
use crate::modules::orders::router::init_orders_router;
use crate::modules::products::router::init_products_router;
use crate::modules::reports::router::init_reports_router;
use crate::modules::reviews::router::init_reviews_router;
use crate::modules::roles::router::init_roles_router;
use crate::modules::tasks::router::init_tasks_router;
use crate::modules::users::router::init_users_router;
use crate::state::AppState;

fn cors_layer(state: &AppState) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = state
        .cors_config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}

pub fn init_router(state: AppState) -> Router {
    let authenticated = |router: Router<AppState>| {
        router.route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
    };
    let admin_only = |router: Router<AppState>| {
        router.route_layer(middleware::from_fn_with_state(state.clone(), require_admin))
    };

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .merge(init_health_router())
        .nest(
            "/api",
            Router::new()
                .nest("/auth", init_auth_router(&state))
                .nest("/admin", admin_only(init_admin_router()))
                .nest("/users", admin_only(init_users_router()))
                .nest("/roles", admin_only(init_roles_router()))
                .nest("/reports", admin_only(init_reports_router()))
                .nest("/categories", authenticated(init_categories_router()))
                .nest("/products", authenticated(init_products_router()))
                .nest("/reviews", authenticated(init_reviews_router()))
                .nest("/cart", authenticated(init_cart_router()))
                .nest("/orders", authenticated(init_orders_router()))
                .nest("/tasks", authenticated(init_tasks_router()))
                .nest("/items", authenticated(init_items_router())),
        )
        .with_state(state.clone())
        .layer(middleware::from_fn(security_headers))
        .layer(cors_layer(&state))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}
