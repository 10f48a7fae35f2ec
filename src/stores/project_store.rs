use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set,
};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::types::db::project::{self, ProjectStatus};
use crate::types::db::{admin_user, project_user};

/// Editable project fields
#[derive(Debug, Clone)]
pub struct ProjectFields {
    pub name: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub manager_id: String,
}

pub async fn find_active_by_name(
    conn: &impl ConnectionTrait,
    name: &str,
) -> Result<Option<project::Model>, InternalError> {
    project::Entity::find()
        .filter(project::Column::Name.eq(name))
        .filter(project::Column::IsDeleted.eq(false))
        .one(conn)
        .await
        .map_err(|e| InternalError::database("find_project_by_name", e))
}

pub async fn insert(
    conn: &impl ConnectionTrait,
    fields: ProjectFields,
    status: ProjectStatus,
) -> Result<project::Model, InternalError> {
    let now = Utc::now().timestamp();

    project::ActiveModel {
        id: Set(Uuid::now_v7().to_string()),
        name: Set(fields.name),
        description: Set(fields.description),
        start_date: Set(fields.start_date),
        end_date: Set(fields.end_date),
        status: Set(status),
        manager_id: Set(fields.manager_id),
        is_deleted: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await
    .map_err(|e| InternalError::database("insert_project", e))
}

pub async fn update(
    conn: &impl ConnectionTrait,
    project: project::Model,
    fields: ProjectFields,
) -> Result<project::Model, InternalError> {
    let mut active: project::ActiveModel = project.into();
    active.name = Set(fields.name);
    active.description = Set(fields.description);
    active.start_date = Set(fields.start_date);
    active.end_date = Set(fields.end_date);
    active.manager_id = Set(fields.manager_id);
    active.updated_at = Set(Utc::now().timestamp());

    active
        .update(conn)
        .await
        .map_err(|e| InternalError::database("update_project", e))
}

pub async fn set_status(
    conn: &impl ConnectionTrait,
    project: project::Model,
    status: ProjectStatus,
) -> Result<project::Model, InternalError> {
    let mut active: project::ActiveModel = project.into();
    active.status = Set(status);
    active.updated_at = Set(Utc::now().timestamp());

    active
        .update(conn)
        .await
        .map_err(|e| InternalError::database("set_project_status", e))
}

pub async fn soft_delete(
    conn: &impl ConnectionTrait,
    project: project::Model,
) -> Result<(), InternalError> {
    let mut active: project::ActiveModel = project.into();
    active.is_deleted = Set(true);
    active.updated_at = Set(Utc::now().timestamp());

    active
        .update(conn)
        .await
        .map_err(|e| InternalError::database("soft_delete_project", e))?;

    Ok(())
}

/// Link admin users to the project, skipping existing links
pub async fn add_members(
    conn: &impl ConnectionTrait,
    project_id: &str,
    admin_user_ids: &[String],
) -> Result<(), InternalError> {
    let mut linked: Vec<String> = project_user::Entity::find()
        .filter(project_user::Column::ProjectId.eq(project_id))
        .all(conn)
        .await
        .map_err(|e| InternalError::database("list_project_users", e))?
        .into_iter()
        .map(|link| link.admin_user_id)
        .collect();

    let now = Utc::now().timestamp();
    for admin_user_id in admin_user_ids {
        if linked.contains(admin_user_id) {
            continue;
        }

        project_user::ActiveModel {
            id: Set(Uuid::now_v7().to_string()),
            project_id: Set(project_id.to_owned()),
            admin_user_id: Set(admin_user_id.clone()),
            created_at: Set(now),
        }
        .insert(conn)
        .await
        .map_err(|e| InternalError::database("insert_project_user", e))?;

        linked.push(admin_user_id.clone());
    }

    Ok(())
}

pub async fn remove_members(
    conn: &impl ConnectionTrait,
    project_id: &str,
    admin_user_ids: &[String],
) -> Result<u64, InternalError> {
    let result = project_user::Entity::delete_many()
        .filter(project_user::Column::ProjectId.eq(project_id))
        .filter(project_user::Column::AdminUserId.is_in(admin_user_ids.iter().cloned()))
        .exec(conn)
        .await
        .map_err(|e| InternalError::database("delete_project_users", e))?;

    Ok(result.rows_affected)
}

/// Non-deleted admin users linked to the project
pub async fn members(
    conn: &impl ConnectionTrait,
    project_id: &str,
) -> Result<Vec<admin_user::Model>, InternalError> {
    admin_user::Entity::find()
        .inner_join(project_user::Entity)
        .filter(project_user::Column::ProjectId.eq(project_id))
        .filter(admin_user::Column::IsDeleted.eq(false))
        .all(conn)
        .await
        .map_err(|e| InternalError::database("list_project_members", e))
}
