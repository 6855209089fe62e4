use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use shopfront_core::{PaginationMeta, PaginationParams};
use shopfront_models::{
    AddCartItemDto, AdminResponse, Cart, CartItem, CartLine, CartResponse, Category,
    CreateCategoryDto, CreateItemDto, CreateOrderDto, CreateProductDto, CreateReviewDto,
    CreateRoleDto, CreateTaskDto, CreateUserDto, Item, LoginRequest, LoginResponse, MeResponse,
    MessageResponse, Order, OrderItem, OrderLineDto, OrderStatus, OrderWithItems,
    PaginatedProductsResponse, PaginatedUsersResponse, Product, ProductFilterParams, ProductSales,
    Review, Role, SalesSummary, Task, UpdateCartItemDto, UpdateItemDto, UpdateOrderStatusDto,
    UpdateTaskDto, UpdateUserDto, User, UserFilterParams,
};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::health::model::HealthResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::health::controller::health_check,
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::me,
        crate::modules::admin::controller::admin_dashboard,
        crate::modules::users::controller::get_users,
        crate::modules::users::controller::get_user,
        crate::modules::users::controller::update_user,
        crate::modules::users::controller::delete_user,
        crate::modules::roles::controller::get_roles,
        crate::modules::roles::controller::create_role,
        crate::modules::categories::controller::create_category,
        crate::modules::categories::controller::get_categories,
        crate::modules::categories::controller::get_category,
        crate::modules::categories::controller::update_category,
        crate::modules::categories::controller::delete_category,
        crate::modules::products::controller::create_product,
        crate::modules::products::controller::get_products,
        crate::modules::products::controller::get_product,
        crate::modules::products::controller::update_product,
        crate::modules::products::controller::delete_product,
        crate::modules::reviews::controller::get_product_reviews,
        crate::modules::reviews::controller::create_review,
        crate::modules::reviews::controller::delete_review,
        crate::modules::carts::controller::get_cart,
        crate::modules::carts::controller::clear_cart,
        crate::modules::carts::controller::add_cart_item,
        crate::modules::carts::controller::update_cart_item,
        crate::modules::carts::controller::remove_cart_item,
        crate::modules::orders::controller::create_order,
        crate::modules::orders::controller::get_orders,
        crate::modules::orders::controller::get_order,
        crate::modules::orders::controller::update_order_status,
        crate::modules::orders::controller::delete_order,
        crate::modules::reports::controller::sales_report,
        crate::modules::reports::controller::summary_report,
        crate::modules::tasks::controller::create_task,
        crate::modules::tasks::controller::get_tasks,
        crate::modules::tasks::controller::get_task,
        crate::modules::tasks::controller::update_task,
        crate::modules::tasks::controller::delete_task,
        crate::modules::items::controller::create_item,
        crate::modules::items::controller::get_item,
        crate::modules::items::controller::update_item,
        crate::modules::items::controller::delete_item,
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            MessageResponse,
            PaginationMeta,
            PaginationParams,
            CreateUserDto,
            LoginRequest,
            LoginResponse,
            MeResponse,
            AdminResponse,
            User,
            UpdateUserDto,
            UserFilterParams,
            PaginatedUsersResponse,
            Role,
            CreateRoleDto,
            Category,
            CreateCategoryDto,
            Product,
            CreateProductDto,
            ProductFilterParams,
            PaginatedProductsResponse,
            Review,
            CreateReviewDto,
            Cart,
            CartItem,
            CartLine,
            CartResponse,
            AddCartItemDto,
            UpdateCartItemDto,
            Order,
            OrderItem,
            OrderStatus,
            OrderWithItems,
            OrderLineDto,
            CreateOrderDto,
            UpdateOrderStatusDto,
            ProductSales,
            SalesSummary,
            Task,
            CreateTaskDto,
            UpdateTaskDto,
            Item,
            CreateItemDto,
            UpdateItemDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Authentication", description = "Registration, login and identity"),
        (name = "Admin", description = "Admin-only landing endpoint"),
        (name = "Users", description = "User management (admin only)"),
        (name = "Roles", description = "Role management (admin only)"),
        (name = "Catalog", description = "Categories and products"),
        (name = "Reviews", description = "Product reviews"),
        (name = "Cart", description = "The caller's shopping cart"),
        (name = "Orders", description = "Order placement and fulfilment"),
        (name = "Reports", description = "Sales reporting (admin only)"),
        (name = "Tasks", description = "Per-user to-do list"),
        (name = "Items", description = "In-memory key/value demo store")
    ),
    info(
        title = "Shopfront API",
        version = "0.1.0",
        description = "A REST API built with Rust, Axum, and PostgreSQL featuring JWT authentication and an exact-match role gate.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
