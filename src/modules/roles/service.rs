use sqlx::PgPool;
use tracing::{info, instrument};

use shopfront_core::AppError;

use super::model::{CreateRoleDto, Role};

pub struct RoleService;

impl RoleService {
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "roles"))]
    pub async fn get_roles(db: &PgPool) -> Result<Vec<Role>, AppError> {
        sqlx::query_as::<_, Role>("SELECT id, name FROM roles ORDER BY name")
            .fetch_all(db)
            .await
            .map_err(AppError::database)
    }

    #[instrument(skip(db, dto), fields(role.name = %dto.name, db.operation = "INSERT", db.table = "roles"))]
    pub async fn create_role(db: &PgPool, dto: CreateRoleDto) -> Result<Role, AppError> {
        let role = sqlx::query_as::<_, Role>(
            "INSERT INTO roles (name) VALUES ($1) RETURNING id, name",
        )
        .bind(dto.name.trim())
        .fetch_one(db)
        .await
        .map_err(|e| AppError::conflict_on_unique(e, "Role already exists"))?;

        info!(role.id = %role.id, "Role created");
        Ok(role)
    }
}
