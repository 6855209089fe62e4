//! Orders and their line items.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::postgres::{PgTypeInfo, PgValueRef};
use sqlx::{Decode, Encode, FromRow, Postgres, Type};
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{OrderId, OrderItemId, ProductId, UserId};

pub const MAX_ORDER_LINES: usize = 50;

/// Largest total a `NUMERIC(14, 2)` column holds.
pub fn max_order_total() -> Decimal {
    Decimal::new(99_999_999_999_999, 2)
}

/// Lifecycle state, stored as lowercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Paid,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        Self::Pending,
        Self::Paid,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOrderStatus(pub String);

impl fmt::Display for UnknownOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown order status: {}", self.0)
    }
}

impl std::error::Error for UnknownOrderStatus {}

impl FromStr for OrderStatus {
    type Err = UnknownOrderStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownOrderStatus(s.to_string()))
    }
}

impl Type<Postgres> for OrderStatus {
    fn type_info() -> PgTypeInfo {
        <String as Type<Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <String as Type<Postgres>>::compatible(ty)
    }
}

impl<'q> Encode<'q, Postgres> for OrderStatus {
    fn encode_by_ref(
        &self,
        buf: &mut <Postgres as sqlx::Database>::ArgumentBuffer<'q>,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <&str as Encode<'q, Postgres>>::encode_by_ref(&self.as_str(), buf)
    }
}

impl<'r> Decode<'r, Postgres> for OrderStatus {
    fn decode(value: PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let raw = <&str as Decode<'r, Postgres>>::decode(value)?;
        Ok(raw.parse()?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub order_date: chrono::DateTime<chrono::Utc>,
    pub status: OrderStatus,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: i32,
    /// Unit price at the time of purchase
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct OrderLineDto {
    pub product_id: ProductId,
    #[validate(range(min = 1, max = 1000, message = "quantity must be between 1 and 1000"))]
    pub quantity: i32,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateOrderDto {
    #[validate(
        length(min = 1, max = 50, message = "items must contain 1-50 lines"),
        nested
    )]
    pub items: Vec<OrderLineDto>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateOrderStatusDto {
    pub status: OrderStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_string_forms_agree() {
        for status in OrderStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_unknown_status_rejected() {
        assert!("refunded".parse::<OrderStatus>().is_err());
        assert!("Pending".parse::<OrderStatus>().is_err());
        let result: Result<UpdateOrderStatusDto, _> =
            serde_json::from_str(r#"{"status":"refunded"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_order_rejected() {
        let dto = CreateOrderDto { items: vec![] };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_nested_line_validated() {
        let dto = CreateOrderDto {
            items: vec![OrderLineDto {
                product_id: ProductId::new(),
                quantity: 0,
            }],
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_too_many_lines_rejected() {
        let line = OrderLineDto {
            product_id: ProductId::new(),
            quantity: 1,
        };
        let dto = CreateOrderDto {
            items: vec![line; MAX_ORDER_LINES + 1],
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_order_with_items_is_flat() {
        let order = Order {
            id: OrderId::new(),
            user_id: UserId::new(),
            order_date: chrono::Utc::now(),
            status: OrderStatus::Pending,
            total_amount: Decimal::new(30, 2),
        };
        let json = serde_json::to_value(OrderWithItems {
            order,
            items: vec![],
        })
        .unwrap();
        assert_eq!(json["status"], "pending");
        assert_eq!(json["total_amount"], 0.3);
        assert!(json["items"].as_array().unwrap().is_empty());
    }
}
