use chrono::Utc;
use sea_orm::{ActiveModelTrait, ConnectionTrait, Set};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::types::db::task::{self, TaskStatus};

#[derive(Debug, Clone)]
pub struct TaskFields {
    pub name: String,
    pub description: Option<String>,
    pub module_id: String,
}

pub async fn insert(
    conn: &impl ConnectionTrait,
    fields: TaskFields,
    status: TaskStatus,
) -> Result<task::Model, InternalError> {
    let now = Utc::now().timestamp();

    task::ActiveModel {
        id: Set(Uuid::now_v7().to_string()),
        name: Set(fields.name),
        description: Set(fields.description),
        status: Set(status),
        module_id: Set(fields.module_id),
        is_deleted: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await
    .map_err(|e| InternalError::database("insert_task", e))
}

pub async fn update(
    conn: &impl ConnectionTrait,
    task: task::Model,
    fields: TaskFields,
) -> Result<task::Model, InternalError> {
    let mut active: task::ActiveModel = task.into();
    active.name = Set(fields.name);
    active.description = Set(fields.description);
    active.module_id = Set(fields.module_id);
    active.updated_at = Set(Utc::now().timestamp());

    active
        .update(conn)
        .await
        .map_err(|e| InternalError::database("update_task", e))
}

pub async fn set_status(
    conn: &impl ConnectionTrait,
    task: task::Model,
    status: TaskStatus,
) -> Result<task::Model, InternalError> {
    let mut active: task::ActiveModel = task.into();
    active.status = Set(status);
    active.updated_at = Set(Utc::now().timestamp());

    active
        .update(conn)
        .await
        .map_err(|e| InternalError::database("set_task_status", e))
}

pub async fn soft_delete(conn: &impl ConnectionTrait, task: task::Model) -> Result<(), InternalError> {
    let mut active: task::ActiveModel = task.into();
    active.is_deleted = Set(true);
    active.updated_at = Set(Utc::now().timestamp());

    active
        .update(conn)
        .await
        .map_err(|e| InternalError::database("soft_delete_task", e))?;

    Ok(())
}
