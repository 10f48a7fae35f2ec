use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, FromQueryResult, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::types::db::{admin_user, admin_user_role, role};

/// Fields needed to create an admin user
pub struct NewAdminUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, FromQueryResult)]
pub struct AdminUserName {
    pub id: String,
    pub name: String,
}

/// Look up a non-deleted admin user by id
pub async fn find_active_by_id(
    conn: &impl ConnectionTrait,
    id: &str,
) -> Result<Option<admin_user::Model>, InternalError> {
    admin_user::Entity::find_by_id(id.to_owned())
        .filter(admin_user::Column::IsDeleted.eq(false))
        .one(conn)
        .await
        .map_err(|e| InternalError::database("find_admin_user_by_id", e))
}

/// Look up a non-deleted admin user by exact (case-sensitive) email
pub async fn find_active_by_email(
    conn: &impl ConnectionTrait,
    email: &str,
) -> Result<Option<admin_user::Model>, InternalError> {
    admin_user::Entity::find()
        .filter(admin_user::Column::Email.eq(email))
        .filter(admin_user::Column::IsDeleted.eq(false))
        .one(conn)
        .await
        .map_err(|e| InternalError::database("find_admin_user_by_email", e))
}

pub async fn insert(
    conn: &impl ConnectionTrait,
    new_user: NewAdminUser,
) -> Result<admin_user::Model, InternalError> {
    let now = Utc::now().timestamp();

    admin_user::ActiveModel {
        id: Set(Uuid::now_v7().to_string()),
        name: Set(new_user.name),
        email: Set(new_user.email),
        password_hash: Set(new_user.password_hash),
        is_deleted: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await
    .map_err(|e| InternalError::database("insert_admin_user", e))
}

/// Update name and, when given, email
pub async fn update_details(
    conn: &impl ConnectionTrait,
    user: admin_user::Model,
    name: String,
    email: Option<String>,
) -> Result<admin_user::Model, InternalError> {
    let mut active: admin_user::ActiveModel = user.into();
    active.name = Set(name);
    if let Some(email) = email {
        active.email = Set(email);
    }
    active.updated_at = Set(Utc::now().timestamp());

    active
        .update(conn)
        .await
        .map_err(|e| InternalError::database("update_admin_user", e))
}

pub async fn set_password_hash(
    conn: &impl ConnectionTrait,
    user: admin_user::Model,
    password_hash: String,
) -> Result<admin_user::Model, InternalError> {
    let mut active: admin_user::ActiveModel = user.into();
    active.password_hash = Set(password_hash);
    active.updated_at = Set(Utc::now().timestamp());

    active
        .update(conn)
        .await
        .map_err(|e| InternalError::database("set_admin_user_password", e))
}

pub async fn touch(
    conn: &impl ConnectionTrait,
    user: admin_user::Model,
) -> Result<admin_user::Model, InternalError> {
    let mut active: admin_user::ActiveModel = user.into();
    active.updated_at = Set(Utc::now().timestamp());

    active
        .update(conn)
        .await
        .map_err(|e| InternalError::database("touch_admin_user", e))
}

pub async fn soft_delete(
    conn: &impl ConnectionTrait,
    user: admin_user::Model,
) -> Result<(), InternalError> {
    let mut active: admin_user::ActiveModel = user.into();
    active.is_deleted = Set(true);
    active.updated_at = Set(Utc::now().timestamp());

    active
        .update(conn)
        .await
        .map_err(|e| InternalError::database("soft_delete_admin_user", e))?;

    Ok(())
}

/// Id and name of every non-deleted admin user, ordered by name
pub async fn list_names(conn: &impl ConnectionTrait) -> Result<Vec<AdminUserName>, InternalError> {
    admin_user::Entity::find()
        .select_only()
        .column(admin_user::Column::Id)
        .column(admin_user::Column::Name)
        .filter(admin_user::Column::IsDeleted.eq(false))
        .order_by_asc(admin_user::Column::Name)
        .into_model::<AdminUserName>()
        .all(conn)
        .await
        .map_err(|e| InternalError::database("list_admin_user_names", e))
}

/// Ids among `ids` that belong to non-deleted admin users
pub async fn existing_ids(
    conn: &impl ConnectionTrait,
    ids: &[String],
) -> Result<Vec<String>, InternalError> {
    let users = admin_user::Entity::find()
        .filter(admin_user::Column::Id.is_in(ids.iter().cloned()))
        .filter(admin_user::Column::IsDeleted.eq(false))
        .all(conn)
        .await
        .map_err(|e| InternalError::database("find_admin_users_by_ids", e))?;

    Ok(users.into_iter().map(|user| user.id).collect())
}

/// The role currently linked to the admin user, if any
pub async fn find_role(
    conn: &impl ConnectionTrait,
    admin_user_id: &str,
) -> Result<Option<role::Model>, InternalError> {
    role::Entity::find()
        .inner_join(admin_user_role::Entity)
        .filter(admin_user_role::Column::AdminUserId.eq(admin_user_id))
        .one(conn)
        .await
        .map_err(|e| InternalError::database("find_admin_user_role", e))
}

/// Roles for a batch of admin users, as `(admin_user_id, role)` pairs
pub async fn find_roles(
    conn: &impl ConnectionTrait,
    admin_user_ids: &[String],
) -> Result<Vec<(String, role::Model)>, InternalError> {
    let links = admin_user_role::Entity::find()
        .filter(admin_user_role::Column::AdminUserId.is_in(admin_user_ids.iter().cloned()))
        .find_also_related(role::Entity)
        .all(conn)
        .await
        .map_err(|e| InternalError::database("find_admin_user_roles", e))?;

    Ok(links
        .into_iter()
        .filter_map(|(link, role)| role.map(|role| (link.admin_user_id, role)))
        .collect())
}

/// Replace the admin user's role link
///
/// The unique index on `admin_user_id` keeps at most one link per user; the
/// old link is removed first so callers should run this inside a transaction.
pub async fn assign_role(
    conn: &impl ConnectionTrait,
    admin_user_id: &str,
    role_id: &str,
) -> Result<(), InternalError> {
    admin_user_role::Entity::delete_many()
        .filter(admin_user_role::Column::AdminUserId.eq(admin_user_id))
        .exec(conn)
        .await
        .map_err(|e| InternalError::database("clear_admin_user_role", e))?;

    let now = Utc::now().timestamp();
    admin_user_role::ActiveModel {
        id: Set(Uuid::now_v7().to_string()),
        admin_user_id: Set(admin_user_id.to_owned()),
        role_id: Set(role_id.to_owned()),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await
    .map_err(|e| InternalError::database("insert_admin_user_role", e))?;

    Ok(())
}
