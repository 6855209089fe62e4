//! Categories and products.

use std::borrow::Cow;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use shopfront_core::serde::{deserialize_optional_trimmed, deserialize_optional_uuid};
use shopfront_core::{PaginationMeta, PaginationParams};

use crate::ids::{CategoryId, ProductId};

/// Largest price a `NUMERIC(12, 2)` column holds.
pub fn max_price() -> Decimal {
    Decimal::new(999_999_999_999, 2)
}

fn price_error(message: &'static str) -> ValidationError {
    ValidationError::new("price").with_message(Cow::Borrowed(message))
}

/// Prices are non-negative, have at most two decimal places and fit the
/// column.
pub fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(price_error("price must not be negative"));
    }
    if price.normalize().scale() > 2 {
        return Err(price_error("price must have at most 2 decimal places"));
    }
    if *price > max_price() {
        return Err(price_error("price must be at most 9999999999.99"));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryDto {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    #[schema(example = "Kitchen")]
    pub name: String,
    pub description: Option<String>,
}

/// Full replacement of a category's mutable fields.
pub type UpdateCategoryDto = CreateCategoryDto;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub stock: i32,
    pub category_id: CategoryId,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProductDto {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    #[schema(example = "Espresso cup")]
    pub name: String,
    pub description: Option<String>,
    #[validate(custom(function = "validate_price"))]
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(example = 12.5)]
    pub price: Decimal,
    #[validate(range(min = 0, message = "stock must not be negative"))]
    #[schema(example = 40)]
    pub stock: i32,
    pub category_id: CategoryId,
}

/// Full replacement of a product's mutable fields.
pub type UpdateProductDto = CreateProductDto;

#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductFilterParams {
    #[serde(default, deserialize_with = "deserialize_optional_uuid")]
    pub category_id: Option<Uuid>,
    /// Case-insensitive substring match on name
    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedProductsResponse {
    pub data: Vec<Product>,
    pub meta: PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product_dto() -> CreateProductDto {
        CreateProductDto {
            name: "Mug".to_string(),
            description: None,
            price: Decimal::new(999, 2),
            stock: 3,
            category_id: CategoryId::new(),
        }
    }

    #[test]
    fn test_product_dto_valid() {
        assert!(product_dto().validate().is_ok());
    }

    #[test]
    fn test_negative_price_and_stock_rejected() {
        let dto = CreateProductDto {
            price: Decimal::new(-1, 2),
            stock: -1,
            ..product_dto()
        };
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("price"));
        assert!(errors.field_errors().contains_key("stock"));
    }

    #[test]
    fn test_free_product_allowed() {
        let dto = CreateProductDto {
            price: Decimal::ZERO,
            stock: 0,
            ..product_dto()
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_price_precision_and_bound() {
        let dto = CreateProductDto {
            price: Decimal::new(1001, 3),
            ..product_dto()
        };
        assert!(dto.validate().is_err());

        // trailing zeros do not count as extra precision
        let dto = CreateProductDto {
            price: Decimal::new(12500, 3),
            ..product_dto()
        };
        assert!(dto.validate().is_ok());

        let dto = CreateProductDto {
            price: max_price() + Decimal::new(1, 2),
            ..product_dto()
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_price_round_trips_as_json_number() {
        let json = r#"{"name":"Mug","price":0.1,"stock":1,"category_id":"00000000-0000-0000-0000-000000000001"}"#;
        let dto: CreateProductDto = serde_json::from_str(json).unwrap();
        assert_eq!(dto.price, Decimal::new(1, 1));
        assert_eq!((dto.price * Decimal::from(3)).to_string(), "0.3");
    }

    #[test]
    fn test_category_name_required() {
        let dto = CreateCategoryDto {
            name: String::new(),
            description: Some("x".into()),
        };
        assert!(dto.validate().is_err());
    }
}
