use chrono::Utc;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::errors::internal::AuthorizationError;
use crate::types::db::{operation, role, role_operation};

pub async fn find_active(
    conn: &impl ConnectionTrait,
    role_id: &str,
) -> Result<Option<role::Model>, InternalError> {
    role::Entity::find_by_id(role_id.to_owned())
        .filter(role::Column::IsDeleted.eq(false))
        .one(conn)
        .await
        .map_err(|e| InternalError::database("find_role", e))
}

pub async fn find_by_slug(
    conn: &impl ConnectionTrait,
    slug: &str,
) -> Result<Option<role::Model>, InternalError> {
    role::Entity::find()
        .filter(role::Column::Slug.eq(slug))
        .filter(role::Column::IsDeleted.eq(false))
        .one(conn)
        .await
        .map_err(|e| InternalError::database("find_role_by_slug", e))
}

/// Non-deleted role whose name matches case-insensitively
pub async fn find_active_by_name(
    conn: &impl ConnectionTrait,
    name: &str,
) -> Result<Option<role::Model>, InternalError> {
    role::Entity::find()
        .filter(Expr::expr(Func::lower(Expr::col((role::Entity, role::Column::Name)))).eq(name.to_lowercase()))
        .filter(role::Column::IsDeleted.eq(false))
        .one(conn)
        .await
        .map_err(|e| InternalError::database("find_role_by_name", e))
}

/// Insert a role whose slug is fixed at creation
pub async fn insert(
    conn: &impl ConnectionTrait,
    slug: &str,
    name: &str,
    editable: bool,
) -> Result<role::Model, InternalError> {
    let now = Utc::now().timestamp();

    role::ActiveModel {
        id: Set(Uuid::now_v7().to_string()),
        slug: Set(slug.to_owned()),
        name: Set(name.to_owned()),
        editable: Set(editable),
        is_deleted: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await
    .map_err(|e| InternalError::database("insert_role", e))
}

pub async fn rename(
    conn: &impl ConnectionTrait,
    role: role::Model,
    name: String,
) -> Result<role::Model, InternalError> {
    let mut active: role::ActiveModel = role.into();
    active.name = Set(name);
    active.updated_at = Set(Utc::now().timestamp());

    active
        .update(conn)
        .await
        .map_err(|e| InternalError::database("rename_role", e))
}

pub async fn soft_delete(conn: &impl ConnectionTrait, role: role::Model) -> Result<(), InternalError> {
    let mut active: role::ActiveModel = role.into();
    active.is_deleted = Set(true);
    active.updated_at = Set(Utc::now().timestamp());

    active
        .update(conn)
        .await
        .map_err(|e| InternalError::database("soft_delete_role", e))?;

    Ok(())
}

/// Editable, non-deleted roles ordered by name
pub async fn list_assignable(conn: &impl ConnectionTrait) -> Result<Vec<role::Model>, InternalError> {
    role::Entity::find()
        .filter(role::Column::IsDeleted.eq(false))
        .filter(role::Column::Editable.eq(true))
        .order_by_asc(role::Column::Name)
        .all(conn)
        .await
        .map_err(|e| InternalError::database("list_assignable_roles", e))
}

/// Operations granted to the role, in tree order
pub async fn granted_operations(
    conn: &impl ConnectionTrait,
    role_id: &str,
) -> Result<Vec<operation::Model>, InternalError> {
    operation::Entity::find()
        .inner_join(role_operation::Entity)
        .filter(role_operation::Column::RoleId.eq(role_id))
        .order_by_asc(operation::Column::OrderIndex)
        .all(conn)
        .await
        .map_err(|e| InternalError::database("find_role_operations", e))
}

/// Replace every grant of the role with `operation_ids`
///
/// Unknown operation ids fail with `OperationNotFound`; run inside a
/// transaction so a failure leaves the previous grants intact.
pub async fn replace_operations(
    conn: &impl ConnectionTrait,
    role_id: &str,
    operation_ids: &[String],
) -> Result<(), InternalError> {
    role_operation::Entity::delete_many()
        .filter(role_operation::Column::RoleId.eq(role_id))
        .exec(conn)
        .await
        .map_err(|e| InternalError::database("clear_role_operations", e))?;

    let now = Utc::now().timestamp();
    let mut granted: Vec<&str> = Vec::with_capacity(operation_ids.len());

    for operation_id in operation_ids {
        if granted.contains(&operation_id.as_str()) {
            continue;
        }

        let exists = operation::Entity::find_by_id(operation_id.clone())
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_operation", e))?
            .is_some();
        if !exists {
            return Err(AuthorizationError::OperationNotFound(operation_id.clone()).into());
        }

        role_operation::ActiveModel {
            id: Set(Uuid::now_v7().to_string()),
            role_id: Set(role_id.to_owned()),
            operation_id: Set(operation_id.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(conn)
        .await
        .map_err(|e| InternalError::database("insert_role_operation", e))?;

        granted.push(operation_id);
    }

    Ok(())
}
