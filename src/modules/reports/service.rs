use sqlx::PgPool;
use tracing::{debug, instrument};

use shopfront_core::AppError;

use super::model::{ProductSales, SalesSummary};

pub struct ReportService;

impl ReportService {
    /// Units sold and revenue per product over every order line, best
    /// sellers first. Revenue uses the unit price recorded at purchase.
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "order_items"))]
    pub async fn sales_by_product(db: &PgPool) -> Result<Vec<ProductSales>, AppError> {
        let rows = sqlx::query_as::<_, ProductSales>(
            "SELECT p.id AS product_id,
                    p.name AS product_name,
                    COALESCE(SUM(oi.quantity), 0)::BIGINT AS units_sold,
                    COALESCE(SUM(oi.price * oi.quantity), 0)::NUMERIC AS total_sales
             FROM order_items oi
             JOIN products p ON p.id = oi.product_id
             GROUP BY p.id, p.name
             ORDER BY total_sales DESC, p.name",
        )
        .fetch_all(db)
        .await
        .map_err(AppError::database)?;

        debug!(products = rows.len(), "Sales report built");
        Ok(rows)
    }

    #[instrument(skip(db), fields(db.operation = "SELECT"))]
    pub async fn summary(db: &PgPool) -> Result<SalesSummary, AppError> {
        sqlx::query_as::<_, SalesSummary>(
            "SELECT (SELECT COUNT(*) FROM users) AS users,
                    (SELECT COUNT(*) FROM products) AS products,
                    (SELECT COUNT(*) FROM categories) AS categories,
                    (SELECT COUNT(*) FROM orders) AS orders",
        )
        .fetch_one(db)
        .await
        .map_err(AppError::database)
    }
}
