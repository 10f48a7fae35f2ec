use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::types::db::module_type;

pub async fn find_active_by_name(
    conn: &impl ConnectionTrait,
    name: &str,
) -> Result<Option<module_type::Model>, InternalError> {
    module_type::Entity::find()
        .filter(module_type::Column::Name.eq(name))
        .filter(module_type::Column::IsDeleted.eq(false))
        .one(conn)
        .await
        .map_err(|e| InternalError::database("find_module_type_by_name", e))
}

pub async fn insert(
    conn: &impl ConnectionTrait,
    name: String,
) -> Result<module_type::Model, InternalError> {
    let now = Utc::now().timestamp();

    module_type::ActiveModel {
        id: Set(Uuid::now_v7().to_string()),
        name: Set(name),
        is_deleted: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await
    .map_err(|e| InternalError::database("insert_module_type", e))
}

pub async fn rename(
    conn: &impl ConnectionTrait,
    module_type: module_type::Model,
    name: String,
) -> Result<module_type::Model, InternalError> {
    let mut active: module_type::ActiveModel = module_type.into();
    active.name = Set(name);
    active.updated_at = Set(Utc::now().timestamp());

    active
        .update(conn)
        .await
        .map_err(|e| InternalError::database("rename_module_type", e))
}

pub async fn soft_delete(
    conn: &impl ConnectionTrait,
    module_type: module_type::Model,
) -> Result<(), InternalError> {
    let mut active: module_type::ActiveModel = module_type.into();
    active.is_deleted = Set(true);
    active.updated_at = Set(Utc::now().timestamp());

    active
        .update(conn)
        .await
        .map_err(|e| InternalError::database("soft_delete_module_type", e))?;

    Ok(())
}
