use sqlx::PgPool;
use tracing::{debug, info, instrument};

use shopfront_core::AppError;
use shopfront_models::CategoryId;

use super::model::{Category, CreateCategoryDto, UpdateCategoryDto};

pub struct CategoryService;

impl CategoryService {
    #[instrument(skip(db, dto), fields(category.name = %dto.name, db.operation = "INSERT", db.table = "categories"))]
    pub async fn create_category(db: &PgPool, dto: CreateCategoryDto) -> Result<Category, AppError> {
        let category = sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name, description) VALUES ($1, $2)
             RETURNING id, name, description",
        )
        .bind(dto.name.trim())
        .bind(&dto.description)
        .fetch_one(db)
        .await
        .map_err(AppError::database)?;

        info!(category.id = %category.id, "Category created");
        Ok(category)
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "categories"))]
    pub async fn get_categories(db: &PgPool) -> Result<Vec<Category>, AppError> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, description FROM categories ORDER BY name",
        )
        .fetch_all(db)
        .await
        .map_err(AppError::database)?;

        debug!(count = categories.len(), "Categories fetched");
        Ok(categories)
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "categories"))]
    pub async fn get_category(db: &PgPool, id: CategoryId) -> Result<Category, AppError> {
        sqlx::query_as::<_, Category>("SELECT id, name, description FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(db)
            .await
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found("Category not found"))
    }

    #[instrument(skip(db, dto), fields(db.operation = "UPDATE", db.table = "categories"))]
    pub async fn update_category(
        db: &PgPool,
        id: CategoryId,
        dto: UpdateCategoryDto,
    ) -> Result<Category, AppError> {
        let category = sqlx::query_as::<_, Category>(
            "UPDATE categories SET name = $2, description = $3 WHERE id = $1
             RETURNING id, name, description",
        )
        .bind(id)
        .bind(dto.name.trim())
        .bind(&dto.description)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found("Category not found"))?;

        info!(category.id = %category.id, "Category updated");
        Ok(category)
    }

    #[instrument(skip(db), fields(db.operation = "DELETE", db.table = "categories"))]
    pub async fn delete_category(db: &PgPool, id: CategoryId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| {
                AppError::conflict_on_foreign_key(e, "Category still has products")
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Category not found"));
        }

        info!(category.id = %id, "Category deleted");
        Ok(())
    }
}
