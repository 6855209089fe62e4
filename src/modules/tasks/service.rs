use sqlx::PgPool;
use tracing::{debug, info, instrument};

use shopfront_core::AppError;
use shopfront_models::{TaskId, UserId};

use super::model::{CreateTaskDto, Task, UpdateTaskDto};

const TASK_COLUMNS: &str = "id, owner_id, title, description, completed, created_at";

/// Task CRUD scoped to the owning user. A task owned by someone else is
/// reported as missing.
pub struct TaskService;

impl TaskService {
    #[instrument(skip(db, dto), fields(db.operation = "INSERT", db.table = "tasks"))]
    pub async fn create_task(
        db: &PgPool,
        owner_id: UserId,
        dto: CreateTaskDto,
    ) -> Result<Task, AppError> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "INSERT INTO tasks (owner_id, title, description, completed)
             VALUES ($1, $2, $3, $4)
             RETURNING {TASK_COLUMNS}"
        ))
        .bind(owner_id)
        .bind(dto.title.trim())
        .bind(&dto.description)
        .bind(dto.completed)
        .fetch_one(db)
        .await
        .map_err(AppError::database)?;

        info!(task.id = %task.id, "Task created");
        Ok(task)
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "tasks"))]
    pub async fn get_tasks(db: &PgPool, owner_id: UserId) -> Result<Vec<Task>, AppError> {
        let tasks = sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE owner_id = $1 ORDER BY created_at DESC"
        ))
        .bind(owner_id)
        .fetch_all(db)
        .await
        .map_err(AppError::database)?;

        debug!(count = tasks.len(), "Tasks fetched");
        Ok(tasks)
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "tasks"))]
    pub async fn get_task(db: &PgPool, owner_id: UserId, id: TaskId) -> Result<Task, AppError> {
        sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1 AND owner_id = $2"
        ))
        .bind(id)
        .bind(owner_id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found("Task not found"))
    }

    #[instrument(skip(db, dto), fields(db.operation = "UPDATE", db.table = "tasks"))]
    pub async fn update_task(
        db: &PgPool,
        owner_id: UserId,
        id: TaskId,
        dto: UpdateTaskDto,
    ) -> Result<Task, AppError> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "UPDATE tasks SET title = $3, description = $4, completed = $5
             WHERE id = $1 AND owner_id = $2
             RETURNING {TASK_COLUMNS}"
        ))
        .bind(id)
        .bind(owner_id)
        .bind(dto.title.trim())
        .bind(&dto.description)
        .bind(dto.completed)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found("Task not found"))?;

        info!(task.id = %task.id, task.completed = task.completed, "Task updated");
        Ok(task)
    }

    #[instrument(skip(db), fields(db.operation = "DELETE", db.table = "tasks"))]
    pub async fn delete_task(db: &PgPool, owner_id: UserId, id: TaskId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(db)
            .await
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Task not found"));
        }

        info!(task.id = %id, "Task deleted");
        Ok(())
    }
}
