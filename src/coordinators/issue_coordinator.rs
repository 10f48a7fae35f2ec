use std::collections::HashMap;
use std::sync::Arc;

use sea_orm::{ConnectionTrait, DatabaseConnection};

use crate::app_data::AppData;
use crate::config::{begin_transaction, commit_transaction};
use crate::coordinators::project_coordinator::ensure_admin_users;
use crate::errors::InternalError;
use crate::errors::internal::ResourceError;
use crate::stores::issue_store::{self, IssueFields};
use crate::stores::listing_store;
use crate::types::db::issue::{self, IssuePriority, IssueStatus};
use crate::types::db::task;
use crate::types::dto::common::Reference;
use crate::types::dto::issue::{
    IssueListResponse, IssueMembersResponse, IssueRequest, IssueResponse,
};
use crate::types::internal::listing::ListParams;

const ISSUE: &str = "Issue";
const TASK: &str = "Task";

/// Issue tracking against tasks
///
/// Issues open as OPEN and can only move to CLOSED once.
pub struct IssueCoordinator {
    db: DatabaseConnection,
}

impl IssueCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            db: app_data.db.clone(),
        }
    }

    pub async fn list(&self, params: ListParams) -> Result<IssueListResponse, InternalError> {
        let page = listing_store::list::<issue::Entity, _>(&self.db, &params).await?;

        let task_ids = page.items.iter().map(|i| i.task_id.clone()).collect();
        let tasks = task_names(&self.db, task_ids).await?;
        let page = page.map(|i| to_response(i, &tasks));

        Ok(IssueListResponse {
            count: page.count,
            list: page.items,
        })
    }

    pub async fn get(&self, issue_id: &str) -> Result<IssueResponse, InternalError> {
        let issue = find(&self.db, issue_id).await?;
        let tasks = task_names(&self.db, vec![issue.task_id.clone()]).await?;
        Ok(to_response(issue, &tasks))
    }

    pub async fn add(&self, request: IssueRequest) -> Result<String, InternalError> {
        let txn = begin_transaction(&self.db).await?;

        ensure_task(&txn, &request.task_id).await?;
        let issue = issue_store::insert(&txn, fields(request)).await?;

        commit_transaction(txn).await?;
        tracing::info!(issue_id = %issue.id, "Issue created");

        Ok(issue.id)
    }

    pub async fn update(&self, issue_id: &str, request: IssueRequest) -> Result<(), InternalError> {
        let txn = begin_transaction(&self.db).await?;

        let issue = find(&txn, issue_id).await?;
        ensure_task(&txn, &request.task_id).await?;
        issue_store::update(&txn, issue, fields(request)).await?;

        commit_transaction(txn).await
    }

    /// # Errors
    /// `ResourceError::InvalidState` when the issue is already closed
    pub async fn close(&self, issue_id: &str) -> Result<(), InternalError> {
        let issue = find(&self.db, issue_id).await?;
        if issue.status == IssueStatus::Closed {
            return Err(ResourceError::InvalidState {
                message: "Issue is already closed.".to_string(),
            }
            .into());
        }

        issue_store::close(&self.db, issue).await?;
        Ok(())
    }

    pub async fn delete(&self, issue_id: &str) -> Result<(), InternalError> {
        let issue = find(&self.db, issue_id).await?;
        issue_store::soft_delete(&self.db, issue).await
    }

    pub async fn members(&self, issue_id: &str) -> Result<IssueMembersResponse, InternalError> {
        let issue = find(&self.db, issue_id).await?;
        let members = issue_store::members(&self.db, &issue.id).await?;

        Ok(IssueMembersResponse {
            issue_id: issue.id,
            admin_users: members
                .into_iter()
                .map(|user| Reference {
                    id: user.id,
                    name: user.name,
                })
                .collect(),
        })
    }

    pub async fn add_members(
        &self,
        issue_id: &str,
        admin_user_ids: Vec<String>,
    ) -> Result<(), InternalError> {
        let txn = begin_transaction(&self.db).await?;

        let issue = find(&txn, issue_id).await?;
        ensure_admin_users(&txn, &admin_user_ids).await?;
        issue_store::add_members(&txn, &issue.id, &admin_user_ids).await?;

        commit_transaction(txn).await
    }

    pub async fn remove_members(
        &self,
        issue_id: &str,
        admin_user_ids: Vec<String>,
    ) -> Result<(), InternalError> {
        let issue = find(&self.db, issue_id).await?;
        let removed = issue_store::remove_members(&self.db, &issue.id, &admin_user_ids).await?;

        tracing::debug!(issue_id, removed, "Issue members removed");
        Ok(())
    }
}

fn fields(request: IssueRequest) -> IssueFields {
    IssueFields {
        name: request.name,
        description: request.description,
        priority: request.priority.unwrap_or(IssuePriority::Medium),
        task_id: request.task_id,
    }
}

fn to_response(issue: issue::Model, tasks: &HashMap<String, String>) -> IssueResponse {
    IssueResponse {
        task: Reference {
            name: tasks.get(&issue.task_id).cloned().unwrap_or_default(),
            id: issue.task_id,
        },
        id: issue.id,
        name: issue.name,
        description: issue.description,
        status: issue.status,
        priority: issue.priority,
    }
}

async fn task_names(
    conn: &impl ConnectionTrait,
    ids: Vec<String>,
) -> Result<HashMap<String, String>, InternalError> {
    listing_store::names_by_id::<task::Entity, _>(conn, ids, task::Column::Id, task::Column::Name).await
}

async fn ensure_task(conn: &impl ConnectionTrait, task_id: &str) -> Result<(), InternalError> {
    match listing_store::find_active::<task::Entity, _>(conn, task_id).await? {
        Some(_) => Ok(()),
        None => Err(ResourceError::not_found(TASK, task_id).into()),
    }
}

async fn find(conn: &impl ConnectionTrait, issue_id: &str) -> Result<issue::Model, InternalError> {
    listing_store::find_active::<issue::Entity, _>(conn, issue_id)
        .await?
        .ok_or_else(|| ResourceError::not_found(ISSUE, issue_id).into())
}
