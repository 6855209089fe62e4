//! # Shopfront Models
//!
//! Database rows, request DTOs (validated with `validator`) and response
//! bodies (documented with `utoipa`).
//!
//! - [`ids`]: typed UUID wrappers per entity
//! - [`auth`]: login, profile and admin bodies
//! - [`users`], [`roles`]: accounts and role names
//! - [`catalog`]: categories and products
//! - [`reviews`], [`carts`], [`orders`]: shopping flow
//! - [`reports`]: sales reporting
//! - [`tasks`]: per-user to-do list
//! - [`items`]: in-memory demo store

pub mod auth;
pub mod carts;
pub mod catalog;
pub mod ids;
pub mod items;
pub mod orders;
pub mod reports;
pub mod reviews;
pub mod roles;
pub mod tasks;
pub mod users;

pub use auth::{AdminResponse, Claims, LoginRequest, LoginResponse, MeResponse, MessageResponse};
pub use carts::{AddCartItemDto, Cart, CartItem, CartLine, CartResponse, UpdateCartItemDto};
pub use catalog::{
    Category, CreateCategoryDto, CreateProductDto, PaginatedProductsResponse, Product,
    ProductFilterParams, UpdateCategoryDto, UpdateProductDto,
};
pub use ids::{
    CartId, CartItemId, CategoryId, OrderId, OrderItemId, ProductId, ReviewId, RoleId, TaskId,
    UserId,
};
pub use items::{CreateItemDto, Item, UpdateItemDto};
pub use orders::{
    CreateOrderDto, Order, OrderItem, OrderLineDto, OrderStatus, OrderWithItems,
    UpdateOrderStatusDto,
};
pub use reports::{ProductSales, SalesSummary};
pub use reviews::{CreateReviewDto, Review};
pub use roles::{CreateRoleDto, Role};
pub use tasks::{CreateTaskDto, Task, UpdateTaskDto};
pub use users::{
    CreateUserDto, PaginatedUsersResponse, UpdateUserDto, User, UserCredentials, UserFilterParams,
};
