use sqlx::PgPool;
use tracing::{debug, error, info, instrument};

use shopfront_core::{AppError, PaginationMeta};
use shopfront_models::{RoleId, UserId};

use super::model::{PaginatedUsersResponse, UpdateUserDto, User, UserFilterParams};

const USER_COLUMNS: &str = "u.id, u.username, u.email, r.name AS role, u.created_at";

pub struct UserService;

impl UserService {
    #[instrument(skip(db, filters), fields(db.operation = "SELECT", db.table = "users"))]
    pub async fn get_users(
        db: &PgPool,
        filters: UserFilterParams,
    ) -> Result<PaginatedUsersResponse, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        let mut where_clause = String::from(" WHERE 1=1");
        let mut params = Vec::new();

        if let Some(username) = &filters.username {
            params.push(format!("%{username}%"));
            where_clause.push_str(&format!(" AND u.username ILIKE ${}", params.len()));
        }

        if let Some(role) = &filters.role {
            params.push(role.clone());
            where_clause.push_str(&format!(" AND r.name = ${}", params.len()));
        }

        let count_query =
            format!("SELECT COUNT(*) FROM users u JOIN roles r ON r.id = u.role_id{where_clause}");
        let mut count_sql = sqlx::query_scalar::<_, i64>(&count_query);
        for param in &params {
            count_sql = count_sql.bind(param);
        }
        let total = count_sql.fetch_one(db).await.map_err(|e| {
            error!(error = %e, "Database error counting users");
            AppError::database(e)
        })?;

        let data_query = format!(
            "SELECT {USER_COLUMNS} FROM users u JOIN roles r ON r.id = u.role_id{where_clause}
             ORDER BY u.created_at DESC LIMIT {limit} OFFSET {offset}"
        );
        let mut data_sql = sqlx::query_as::<_, User>(&data_query);
        for param in params {
            data_sql = data_sql.bind(param);
        }
        let users = data_sql.fetch_all(db).await.map_err(|e| {
            error!(error = %e, "Database error fetching users");
            AppError::database(e)
        })?;

        debug!(total, returned = users.len(), "Users fetched");

        Ok(PaginatedUsersResponse {
            data: users,
            meta: PaginationMeta::new(total, &filters.pagination),
        })
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "users"))]
    pub async fn get_user(db: &PgPool, user_id: UserId) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users u JOIN roles r ON r.id = u.role_id WHERE u.id = $1"
        ))
        .bind(user_id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found("User not found"))
    }

    #[instrument(skip(db, dto), fields(db.operation = "UPDATE", db.table = "users"))]
    pub async fn update_user(
        db: &PgPool,
        user_id: UserId,
        dto: UpdateUserDto,
    ) -> Result<User, AppError> {
        let role_id = sqlx::query_scalar::<_, RoleId>("SELECT id FROM roles WHERE name = $1")
            .bind(&dto.role)
            .fetch_optional(db)
            .await
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::bad_request(format!("Unknown role: {}", dto.role)))?;

        let user = sqlx::query_as::<_, User>(
            "WITH updated AS (
                 UPDATE users SET username = $2, email = $3, role_id = $4
                 WHERE id = $1
                 RETURNING id, username, email, role_id, created_at
             )
             SELECT u.id, u.username, u.email, r.name AS role, u.created_at
             FROM updated u JOIN roles r ON r.id = u.role_id",
        )
        .bind(user_id)
        .bind(dto.username.trim())
        .bind(dto.email.trim().to_lowercase())
        .bind(role_id)
        .fetch_optional(db)
        .await
        .map_err(|e| AppError::conflict_on_unique(e, "Username or email already exists"))?
        .ok_or_else(|| AppError::not_found("User not found"))?;

        info!(user.id = %user.id, user.role = %user.role, "User updated");
        Ok(user)
    }

    #[instrument(skip(db), fields(db.operation = "DELETE", db.table = "users"))]
    pub async fn delete_user(db: &PgPool, user_id: UserId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(db)
            .await
            .map_err(|e| AppError::conflict_on_foreign_key(e, "User has orders and cannot be deleted"))?;

        if result.rows_affected() == 0 {
            debug!("User not found for deletion");
            return Err(AppError::not_found("User not found"));
        }

        info!(user.id = %user_id, "User deleted");
        Ok(())
    }
}
