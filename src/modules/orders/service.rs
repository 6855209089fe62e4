use std::collections::HashMap;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use sqlx::PgPool;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use shopfront_core::AppError;
use shopfront_models::orders::max_order_total;
use shopfront_models::{OrderId, ProductId, UserId};
use shopfront_observability::track_order_created;

use super::model::{CreateOrderDto, Order, OrderItem, OrderStatus, OrderWithItems};

const ORDER_COLUMNS: &str = "id, user_id, order_date, status, total_amount";

/// Price and remaining stock of a product locked for the order.
struct LockedProduct {
    price: Decimal,
    stock: i32,
}

pub struct OrderService;

impl OrderService {
    /// Places an order in a single transaction: the products are locked,
    /// stock is checked and decremented, and the order is stored with each
    /// line's unit price at purchase time.
    #[instrument(skip(db, dto), fields(order.lines = dto.items.len(), db.operation = "INSERT", db.table = "orders"))]
    pub async fn create_order(
        db: &PgPool,
        user_id: UserId,
        dto: CreateOrderDto,
    ) -> Result<OrderWithItems, AppError> {
        let mut tx = db.begin().await.map_err(AppError::database)?;

        let mut product_ids: Vec<Uuid> = dto.items.iter().map(|l| l.product_id.into_inner()).collect();
        product_ids.sort_unstable();
        product_ids.dedup();

        let rows = sqlx::query_as::<_, (ProductId, Decimal, i32)>(
            "SELECT id, price, stock FROM products WHERE id = ANY($1) ORDER BY id FOR UPDATE",
        )
        .bind(&product_ids)
        .fetch_all(&mut *tx)
        .await
        .map_err(AppError::database)?;

        let mut locked: HashMap<ProductId, LockedProduct> = rows
            .into_iter()
            .map(|(id, price, stock)| (id, LockedProduct { price, stock }))
            .collect();

        let mut total_amount = Decimal::ZERO;
        for line in &dto.items {
            let product = locked.get_mut(&line.product_id).ok_or_else(|| {
                AppError::not_found(format!("Product {} not found", line.product_id))
            })?;

            if product.stock < line.quantity {
                warn!(
                    product.id = %line.product_id,
                    requested = line.quantity,
                    available = product.stock,
                    "Insufficient stock"
                );
                return Err(AppError::conflict(format!(
                    "Insufficient stock for product {}",
                    line.product_id
                )));
            }

            product.stock -= line.quantity;
            total_amount += product.price * Decimal::from(line.quantity);
        }

        if total_amount > max_order_total() {
            return Err(AppError::bad_request("Order total is too large"));
        }

        for line in &dto.items {
            sqlx::query("UPDATE products SET stock = stock - $2 WHERE id = $1")
                .bind(line.product_id)
                .bind(line.quantity)
                .execute(&mut *tx)
                .await
                .map_err(AppError::database)?;
        }

        let order = sqlx::query_as::<_, Order>(&format!(
            "INSERT INTO orders (user_id, status, total_amount) VALUES ($1, $2, $3)
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(user_id)
        .bind(OrderStatus::Pending)
        .bind(total_amount)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::database)?;

        let mut items = Vec::with_capacity(dto.items.len());
        for (line_no, line) in (1_i32..).zip(&dto.items) {
            let price = locked
                .get(&line.product_id)
                .map(|p| p.price)
                .ok_or_else(|| AppError::internal_error("Locked product disappeared"))?;

            let item = sqlx::query_as::<_, OrderItem>(
                "INSERT INTO order_items (order_id, line_no, product_id, quantity, price)
                 VALUES ($1, $2, $3, $4, $5)
                 RETURNING id, order_id, product_id, quantity, price",
            )
            .bind(order.id)
            .bind(line_no)
            .bind(line.product_id)
            .bind(line.quantity)
            .bind(price)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::database)?;

            items.push(item);
        }

        tx.commit().await.map_err(AppError::database)?;

        track_order_created(order.total_amount.to_f64().unwrap_or_default());
        info!(
            order.id = %order.id,
            user.id = %user_id,
            order.total = %order.total_amount,
            "Order created"
        );

        Ok(OrderWithItems { order, items })
    }

    /// Every order for admins, otherwise only the caller's.
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "orders"))]
    pub async fn get_orders(
        db: &PgPool,
        user_id: UserId,
        is_admin: bool,
    ) -> Result<Vec<Order>, AppError> {
        let owner = (!is_admin).then_some(user_id);

        let orders = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders
             WHERE $1::uuid IS NULL OR user_id = $1
             ORDER BY order_date DESC"
        ))
        .bind(owner)
        .fetch_all(db)
        .await
        .map_err(AppError::database)?;

        debug!(count = orders.len(), "Orders fetched");
        Ok(orders)
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "orders"))]
    pub async fn get_order(db: &PgPool, order_id: OrderId) -> Result<OrderWithItems, AppError> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"
        ))
        .bind(order_id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found("Order not found"))?;

        let items = sqlx::query_as::<_, OrderItem>(
            "SELECT id, order_id, product_id, quantity, price
             FROM order_items WHERE order_id = $1 ORDER BY line_no",
        )
        .bind(order_id)
        .fetch_all(db)
        .await
        .map_err(AppError::database)?;

        Ok(OrderWithItems { order, items })
    }

    #[instrument(skip(db), fields(db.operation = "UPDATE", db.table = "orders"))]
    pub async fn update_status(
        db: &PgPool,
        order_id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, AppError> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "UPDATE orders SET status = $2 WHERE id = $1 RETURNING {ORDER_COLUMNS}"
        ))
        .bind(order_id)
        .bind(status)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found("Order not found"))?;

        info!(order.id = %order.id, order.status = %order.status, "Order status updated");
        Ok(order)
    }

    #[instrument(skip(db), fields(db.operation = "DELETE", db.table = "orders"))]
    pub async fn delete_order(db: &PgPool, order_id: OrderId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(order_id)
            .execute(db)
            .await
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Order not found"));
        }

        info!(order.id = %order_id, "Order deleted");
        Ok(())
    }
}
