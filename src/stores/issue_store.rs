use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set,
};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::types::db::issue::{self, IssuePriority, IssueStatus};
use crate::types::db::{admin_user, issue_user};

#[derive(Debug, Clone)]
pub struct IssueFields {
    pub name: String,
    pub description: Option<String>,
    pub priority: IssuePriority,
    pub task_id: String,
}

pub async fn insert(
    conn: &impl ConnectionTrait,
    fields: IssueFields,
) -> Result<issue::Model, InternalError> {
    let now = Utc::now().timestamp();

    issue::ActiveModel {
        id: Set(Uuid::now_v7().to_string()),
        name: Set(fields.name),
        description: Set(fields.description),
        status: Set(IssueStatus::Open),
        priority: Set(fields.priority),
        task_id: Set(fields.task_id),
        is_deleted: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await
    .map_err(|e| InternalError::database("insert_issue", e))
}

pub async fn update(
    conn: &impl ConnectionTrait,
    issue: issue::Model,
    fields: IssueFields,
) -> Result<issue::Model, InternalError> {
    let mut active: issue::ActiveModel = issue.into();
    active.name = Set(fields.name);
    active.description = Set(fields.description);
    active.priority = Set(fields.priority);
    active.task_id = Set(fields.task_id);
    active.updated_at = Set(Utc::now().timestamp());

    active
        .update(conn)
        .await
        .map_err(|e| InternalError::database("update_issue", e))
}

pub async fn close(
    conn: &impl ConnectionTrait,
    issue: issue::Model,
) -> Result<issue::Model, InternalError> {
    let mut active: issue::ActiveModel = issue.into();
    active.status = Set(IssueStatus::Closed);
    active.updated_at = Set(Utc::now().timestamp());

    active
        .update(conn)
        .await
        .map_err(|e| InternalError::database("close_issue", e))
}

pub async fn soft_delete(conn: &impl ConnectionTrait, issue: issue::Model) -> Result<(), InternalError> {
    let mut active: issue::ActiveModel = issue.into();
    active.is_deleted = Set(true);
    active.updated_at = Set(Utc::now().timestamp());

    active
        .update(conn)
        .await
        .map_err(|e| InternalError::database("soft_delete_issue", e))?;

    Ok(())
}

/// Link admin users to the issue, skipping existing links
pub async fn add_members(
    conn: &impl ConnectionTrait,
    issue_id: &str,
    admin_user_ids: &[String],
) -> Result<(), InternalError> {
    let mut linked: Vec<String> = issue_user::Entity::find()
        .filter(issue_user::Column::IssueId.eq(issue_id))
        .all(conn)
        .await
        .map_err(|e| InternalError::database("list_issue_users", e))?
        .into_iter()
        .map(|link| link.admin_user_id)
        .collect();

    let now = Utc::now().timestamp();
    for admin_user_id in admin_user_ids {
        if linked.contains(admin_user_id) {
            continue;
        }

        issue_user::ActiveModel {
            id: Set(Uuid::now_v7().to_string()),
            issue_id: Set(issue_id.to_owned()),
            admin_user_id: Set(admin_user_id.clone()),
            created_at: Set(now),
        }
        .insert(conn)
        .await
        .map_err(|e| InternalError::database("insert_issue_user", e))?;

        linked.push(admin_user_id.clone());
    }

    Ok(())
}

pub async fn remove_members(
    conn: &impl ConnectionTrait,
    issue_id: &str,
    admin_user_ids: &[String],
) -> Result<u64, InternalError> {
    let result = issue_user::Entity::delete_many()
        .filter(issue_user::Column::IssueId.eq(issue_id))
        .filter(issue_user::Column::AdminUserId.is_in(admin_user_ids.iter().cloned()))
        .exec(conn)
        .await
        .map_err(|e| InternalError::database("delete_issue_users", e))?;

    Ok(result.rows_affected)
}

pub async fn members(
    conn: &impl ConnectionTrait,
    issue_id: &str,
) -> Result<Vec<admin_user::Model>, InternalError> {
    admin_user::Entity::find()
        .inner_join(issue_user::Entity)
        .filter(issue_user::Column::IssueId.eq(issue_id))
        .filter(admin_user::Column::IsDeleted.eq(false))
        .all(conn)
        .await
        .map_err(|e| InternalError::database("list_issue_members", e))
}
