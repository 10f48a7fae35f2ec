use chrono::Utc;
use sea_orm::{ActiveModelTrait, ConnectionTrait, Set};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::types::db::module;

#[derive(Debug, Clone)]
pub struct ModuleFields {
    pub name: String,
    pub description: String,
    pub project_id: String,
    pub module_type_id: String,
}

pub async fn insert(
    conn: &impl ConnectionTrait,
    fields: ModuleFields,
) -> Result<module::Model, InternalError> {
    let now = Utc::now().timestamp();

    module::ActiveModel {
        id: Set(Uuid::now_v7().to_string()),
        name: Set(fields.name),
        description: Set(fields.description),
        project_id: Set(fields.project_id),
        module_type_id: Set(fields.module_type_id),
        is_deleted: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await
    .map_err(|e| InternalError::database("insert_module", e))
}

pub async fn update(
    conn: &impl ConnectionTrait,
    module: module::Model,
    fields: ModuleFields,
) -> Result<module::Model, InternalError> {
    let mut active: module::ActiveModel = module.into();
    active.name = Set(fields.name);
    active.description = Set(fields.description);
    active.project_id = Set(fields.project_id);
    active.module_type_id = Set(fields.module_type_id);
    active.updated_at = Set(Utc::now().timestamp());

    active
        .update(conn)
        .await
        .map_err(|e| InternalError::database("update_module", e))
}

pub async fn soft_delete(
    conn: &impl ConnectionTrait,
    module: module::Model,
) -> Result<(), InternalError> {
    let mut active: module::ActiveModel = module.into();
    active.is_deleted = Set(true);
    active.updated_at = Set(Utc::now().timestamp());

    active
        .update(conn)
        .await
        .map_err(|e| InternalError::database("soft_delete_module", e))?;

    Ok(())
}
