//! Owner-scoped to-do tasks.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{TaskId, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Task {
    pub id: TaskId,
    pub owner_id: UserId,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateTaskDto {
    #[validate(length(min = 1, max = 200, message = "title must be 1-200 characters"))]
    #[schema(example = "Restock espresso cups")]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

/// Full replacement of a task's mutable fields.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateTaskDto {
    #[validate(length(min = 1, max = 200, message = "title must be 1-200 characters"))]
    pub title: String,
    pub description: String,
    pub completed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_defaults() {
        let dto: CreateTaskDto = serde_json::from_str(r#"{"title":"Ship it"}"#).unwrap();
        assert!(dto.validate().is_ok());
        assert!(dto.description.is_empty());
        assert!(!dto.completed);
    }

    #[test]
    fn test_update_requires_every_field() {
        let result: Result<UpdateTaskDto, _> = serde_json::from_str(r#"{"title":"x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_blank_title_rejected() {
        let dto = CreateTaskDto {
            title: String::new(),
            description: String::new(),
            completed: false,
        };
        assert!(dto.validate().is_err());
    }
}
