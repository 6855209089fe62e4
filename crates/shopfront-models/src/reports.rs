//! Admin reporting rows.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::ids::ProductId;

/// Units sold and revenue for one product, over all order items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ProductSales {
    pub product_id: ProductId,
    pub product_name: String,
    pub units_sold: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_sales: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct SalesSummary {
    pub users: i64,
    pub products: i64,
    pub categories: i64,
    pub orders: i64,
}
