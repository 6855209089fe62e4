use sqlx::PgPool;
use tracing::{info, instrument, warn};

use shopfront_core::AppError;
use shopfront_models::{ProductId, ReviewId, UserId};

use super::model::{CreateReviewDto, Review};
use crate::modules::products::service::ProductService;

const REVIEW_SELECT: &str = "SELECT r.id, r.product_id, r.user_id, u.username, r.rating, r.comment, r.created_at
     FROM reviews r JOIN users u ON u.id = r.user_id";

pub struct ReviewService;

impl ReviewService {
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "reviews"))]
    pub async fn get_product_reviews(
        db: &PgPool,
        product_id: ProductId,
    ) -> Result<Vec<Review>, AppError> {
        ProductService::ensure_exists(db, product_id).await?;

        sqlx::query_as::<_, Review>(&format!(
            "{REVIEW_SELECT} WHERE r.product_id = $1 ORDER BY r.created_at DESC"
        ))
        .bind(product_id)
        .fetch_all(db)
        .await
        .map_err(AppError::database)
    }

    #[instrument(skip(db, dto), fields(review.rating = dto.rating, db.operation = "INSERT", db.table = "reviews"))]
    pub async fn create_review(
        db: &PgPool,
        product_id: ProductId,
        user_id: UserId,
        dto: CreateReviewDto,
    ) -> Result<Review, AppError> {
        ProductService::ensure_exists(db, product_id).await?;

        let review = sqlx::query_as::<_, Review>(
            "WITH inserted AS (
                 INSERT INTO reviews (product_id, user_id, rating, comment)
                 VALUES ($1, $2, $3, $4)
                 RETURNING id, product_id, user_id, rating, comment, created_at
             )
             SELECT r.id, r.product_id, r.user_id, u.username, r.rating, r.comment, r.created_at
             FROM inserted r JOIN users u ON u.id = r.user_id",
        )
        .bind(product_id)
        .bind(user_id)
        .bind(dto.rating)
        .bind(&dto.comment)
        .fetch_one(db)
        .await
        .map_err(AppError::database)?;

        info!(review.id = %review.id, product.id = %product_id, "Review created");
        Ok(review)
    }

    /// Deletes a review written by `user_id`. Admins may delete any review.
    #[instrument(skip(db), fields(db.operation = "DELETE", db.table = "reviews"))]
    pub async fn delete_review(
        db: &PgPool,
        review_id: ReviewId,
        user_id: UserId,
        is_admin: bool,
    ) -> Result<(), AppError> {
        let deleted: Option<ReviewId> = sqlx::query_scalar(
            "DELETE FROM reviews WHERE id = $1 AND (user_id = $2 OR $3) RETURNING id",
        )
        .bind(review_id)
        .bind(user_id)
        .bind(is_admin)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?;

        if deleted.is_none() {
            let exists: bool =
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM reviews WHERE id = $1)")
                    .bind(review_id)
                    .fetch_one(db)
                    .await
                    .map_err(AppError::database)?;

            if !exists {
                return Err(AppError::not_found("Review not found"));
            }

            warn!(review.id = %review_id, user.id = %user_id, "Review delete by non-author denied");
            return Err(AppError::forbidden("Access forbidden"));
        }

        info!(review.id = %review_id, "Review deleted");
        Ok(())
    }
}
