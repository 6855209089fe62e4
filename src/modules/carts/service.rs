use sqlx::PgPool;
use tracing::{debug, info, instrument};

use shopfront_core::AppError;
use shopfront_models::{CartItemId, UserId};

use super::model::{AddCartItemDto, Cart, CartItem, CartLine, CartResponse, UpdateCartItemDto};
use crate::modules::products::service::ProductService;

const CART_LINE_SELECT: &str = "SELECT ci.id, ci.product_id, p.name AS product_name, p.price AS unit_price, ci.quantity
     FROM cart_items ci JOIN products p ON p.id = ci.product_id";

pub struct CartService;

impl CartService {
    /// Returns the caller's cart, creating it on first access.
    async fn get_or_create_cart(db: &PgPool, user_id: UserId) -> Result<Cart, AppError> {
        sqlx::query_as::<_, Cart>(
            "INSERT INTO carts (user_id) VALUES ($1)
             ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id
             RETURNING id, user_id, created_at",
        )
        .bind(user_id)
        .fetch_one(db)
        .await
        .map_err(AppError::database)
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "carts"))]
    pub async fn get_cart(db: &PgPool, user_id: UserId) -> Result<CartResponse, AppError> {
        let cart = Self::get_or_create_cart(db, user_id).await?;

        let lines = sqlx::query_as::<_, CartLine>(&format!(
            "{CART_LINE_SELECT} WHERE ci.cart_id = $1 ORDER BY p.name"
        ))
        .bind(cart.id)
        .fetch_all(db)
        .await
        .map_err(AppError::database)?;

        debug!(cart.id = %cart.id, lines = lines.len(), "Cart fetched");
        Ok(CartResponse::new(cart, lines))
    }

    /// Adds a product to the caller's cart. Adding a product already in the
    /// cart increases its quantity.
    #[instrument(skip(db, dto), fields(product.id = %dto.product_id, db.operation = "INSERT", db.table = "cart_items"))]
    pub async fn add_item(
        db: &PgPool,
        user_id: UserId,
        dto: AddCartItemDto,
    ) -> Result<CartItem, AppError> {
        ProductService::ensure_exists(db, dto.product_id).await?;
        let cart = Self::get_or_create_cart(db, user_id).await?;

        let item = sqlx::query_as::<_, CartItem>(
            "INSERT INTO cart_items (cart_id, product_id, quantity) VALUES ($1, $2, $3)
             ON CONFLICT (cart_id, product_id)
             DO UPDATE SET quantity = cart_items.quantity + EXCLUDED.quantity
             RETURNING id, cart_id, product_id, quantity",
        )
        .bind(cart.id)
        .bind(dto.product_id)
        .bind(dto.quantity)
        .fetch_one(db)
        .await
        .map_err(AppError::database)?;

        info!(cart.id = %cart.id, cart_item.id = %item.id, quantity = item.quantity, "Cart item added");
        Ok(item)
    }

    #[instrument(skip(db, dto), fields(db.operation = "UPDATE", db.table = "cart_items"))]
    pub async fn update_item(
        db: &PgPool,
        user_id: UserId,
        item_id: CartItemId,
        dto: UpdateCartItemDto,
    ) -> Result<CartItem, AppError> {
        let item = sqlx::query_as::<_, CartItem>(
            "UPDATE cart_items ci SET quantity = $3
             FROM carts c
             WHERE ci.id = $1 AND ci.cart_id = c.id AND c.user_id = $2
             RETURNING ci.id, ci.cart_id, ci.product_id, ci.quantity",
        )
        .bind(item_id)
        .bind(user_id)
        .bind(dto.quantity)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found("Cart item not found"))?;

        info!(cart_item.id = %item.id, quantity = item.quantity, "Cart item updated");
        Ok(item)
    }

    #[instrument(skip(db), fields(db.operation = "DELETE", db.table = "cart_items"))]
    pub async fn remove_item(
        db: &PgPool,
        user_id: UserId,
        item_id: CartItemId,
    ) -> Result<(), AppError> {
        let result = sqlx::query(
            "DELETE FROM cart_items ci USING carts c
             WHERE ci.id = $1 AND ci.cart_id = c.id AND c.user_id = $2",
        )
        .bind(item_id)
        .bind(user_id)
        .execute(db)
        .await
        .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Cart item not found"));
        }

        info!(cart_item.id = %item_id, "Cart item removed");
        Ok(())
    }

    #[instrument(skip(db), fields(db.operation = "DELETE", db.table = "cart_items"))]
    pub async fn clear_cart(db: &PgPool, user_id: UserId) -> Result<(), AppError> {
        let result = sqlx::query(
            "DELETE FROM cart_items ci USING carts c
             WHERE ci.cart_id = c.id AND c.user_id = $1",
        )
        .bind(user_id)
        .execute(db)
        .await
        .map_err(AppError::database)?;

        info!(removed = result.rows_affected(), "Cart cleared");
        Ok(())
    }
}
