use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::{debug, info, instrument};

use shopfront_core::{AppError, PaginationMeta};
use shopfront_models::ProductId;

use super::model::{
    CreateProductDto, PaginatedProductsResponse, Product, ProductFilterParams, UpdateProductDto,
};

const PRODUCT_COLUMNS: &str = "id, name, description, price, stock, category_id, created_at";

fn push_filters<'a>(builder: &mut QueryBuilder<'a, Postgres>, filters: &'a ProductFilterParams) {
    builder.push(" WHERE 1=1");

    if let Some(category_id) = filters.category_id {
        builder.push(" AND category_id = ").push_bind(category_id);
    }

    if let Some(name) = &filters.name {
        builder
            .push(" AND name ILIKE ")
            .push_bind(format!("%{name}%"));
    }
}

pub struct ProductService;

impl ProductService {
    #[instrument(skip(db, dto), fields(product.name = %dto.name, db.operation = "INSERT", db.table = "products"))]
    pub async fn create_product(db: &PgPool, dto: CreateProductDto) -> Result<Product, AppError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "INSERT INTO products (name, description, price, stock, category_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(dto.name.trim())
        .bind(&dto.description)
        .bind(dto.price)
        .bind(dto.stock)
        .bind(dto.category_id)
        .fetch_one(db)
        .await
        .map_err(AppError::database)?;

        info!(product.id = %product.id, category.id = %product.category_id, "Product created");
        Ok(product)
    }

    #[instrument(skip(db, filters), fields(db.operation = "SELECT", db.table = "products"))]
    pub async fn get_products(
        db: &PgPool,
        filters: ProductFilterParams,
    ) -> Result<PaginatedProductsResponse, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        let mut count = QueryBuilder::new("SELECT COUNT(*) FROM products");
        push_filters(&mut count, &filters);
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(db)
            .await
            .map_err(AppError::database)?;

        let mut select = QueryBuilder::new(format!("SELECT {PRODUCT_COLUMNS} FROM products"));
        push_filters(&mut select, &filters);
        select
            .push(" ORDER BY created_at DESC, id LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let products = select
            .build_query_as::<Product>()
            .fetch_all(db)
            .await
            .map_err(AppError::database)?;

        debug!(total, returned = products.len(), "Products fetched");

        Ok(PaginatedProductsResponse {
            data: products,
            meta: PaginationMeta::new(total, &filters.pagination),
        })
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "products"))]
    pub async fn get_product(db: &PgPool, id: ProductId) -> Result<Product, AppError> {
        sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found("Product not found"))
    }

    #[instrument(skip(db, dto), fields(db.operation = "UPDATE", db.table = "products"))]
    pub async fn update_product(
        db: &PgPool,
        id: ProductId,
        dto: UpdateProductDto,
    ) -> Result<Product, AppError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "UPDATE products
             SET name = $2, description = $3, price = $4, stock = $5, category_id = $6
             WHERE id = $1
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(id)
        .bind(dto.name.trim())
        .bind(&dto.description)
        .bind(dto.price)
        .bind(dto.stock)
        .bind(dto.category_id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found("Product not found"))?;

        info!(product.id = %product.id, "Product updated");
        Ok(product)
    }

    #[instrument(skip(db), fields(db.operation = "DELETE", db.table = "products"))]
    pub async fn delete_product(db: &PgPool, id: ProductId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| {
                AppError::conflict_on_foreign_key(e, "Product has been ordered and cannot be deleted")
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Product not found"));
        }

        info!(product.id = %id, "Product deleted");
        Ok(())
    }

    /// 404 unless the product exists.
    pub async fn ensure_exists(db: &PgPool, id: ProductId) -> Result<(), AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)")
                .bind(id)
                .fetch_one(db)
                .await
                .map_err(AppError::database)?;

        if !exists {
            return Err(AppError::not_found("Product not found"));
        }
        Ok(())
    }
}
