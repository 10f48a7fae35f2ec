use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select, Set,
};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::types::db::{admin_user_role, operation, role, role_operation};

/// Top-level headings in `order_index` order
pub async fn headings(conn: &impl ConnectionTrait) -> Result<Vec<operation::Model>, InternalError> {
    operation::Entity::find()
        .filter(operation::Column::ParentId.is_null())
        .order_by_asc(operation::Column::OrderIndex)
        .all(conn)
        .await
        .map_err(|e| InternalError::database("list_operation_headings", e))
}

/// Every leaf operation, grouped by heading through `parent_id`
pub async fn leaves(conn: &impl ConnectionTrait) -> Result<Vec<operation::Model>, InternalError> {
    operation::Entity::find()
        .filter(operation::Column::ParentId.is_not_null())
        .order_by_asc(operation::Column::OrderIndex)
        .all(conn)
        .await
        .map_err(|e| InternalError::database("list_operation_leaves", e))
}

/// Leaf operations reachable from the admin user's role
pub async fn granted_leaves(
    conn: &impl ConnectionTrait,
    admin_user_id: &str,
) -> Result<Vec<operation::Model>, InternalError> {
    granted_to(admin_user_id)
        .filter(operation::Column::ParentId.is_not_null())
        .order_by_asc(operation::Column::OrderIndex)
        .all(conn)
        .await
        .map_err(|e| InternalError::database("list_granted_operations", e))
}

/// Whether the admin user's role grants the operation with this slug
pub async fn is_granted(
    conn: &impl ConnectionTrait,
    admin_user_id: &str,
    operation_slug: &str,
) -> Result<bool, InternalError> {
    let matches = granted_to(admin_user_id)
        .filter(operation::Column::Slug.eq(operation_slug))
        .count(conn)
        .await
        .map_err(|e| InternalError::database("check_operation_grant", e))?;

    Ok(matches > 0)
}

/// Operations joined through RoleOperation -> Role -> AdminUserRole
fn granted_to(admin_user_id: &str) -> Select<operation::Entity> {
    operation::Entity::find()
        .join(JoinType::InnerJoin, operation::Relation::RoleOperation.def())
        .join(JoinType::InnerJoin, role_operation::Relation::Role.def())
        .join(JoinType::InnerJoin, role::Relation::AdminUserRole.def())
        .filter(admin_user_role::Column::AdminUserId.eq(admin_user_id))
        .filter(role::Column::IsDeleted.eq(false))
}

pub async fn find_by_slug(
    conn: &impl ConnectionTrait,
    slug: &str,
) -> Result<Option<operation::Model>, InternalError> {
    operation::Entity::find()
        .filter(operation::Column::Slug.eq(slug))
        .one(conn)
        .await
        .map_err(|e| InternalError::database("find_operation_by_slug", e))
}

pub async fn insert(
    conn: &impl ConnectionTrait,
    slug: &str,
    name: &str,
    order_index: i32,
    parent_id: Option<String>,
) -> Result<operation::Model, InternalError> {
    let now = Utc::now().timestamp();

    operation::ActiveModel {
        id: Set(Uuid::now_v7().to_string()),
        slug: Set(slug.to_owned()),
        name: Set(name.to_owned()),
        order_index: Set(order_index),
        parent_id: Set(parent_id),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await
    .map_err(|e| InternalError::database("insert_operation", e))
}
