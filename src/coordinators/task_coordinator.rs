use std::collections::HashMap;
use std::sync::Arc;

use sea_orm::{ConnectionTrait, DatabaseConnection};

use crate::app_data::AppData;
use crate::config::{begin_transaction, commit_transaction};
use crate::errors::InternalError;
use crate::errors::internal::ResourceError;
use crate::stores::listing_store;
use crate::stores::task_store::{self, TaskFields};
use crate::types::db::module;
use crate::types::db::task::{self, TaskStatus};
use crate::types::dto::common::Reference;
use crate::types::dto::task::{TaskListResponse, TaskRequest, TaskResponse};
use crate::types::internal::listing::ListParams;

const TASK: &str = "Task";
const MODULE: &str = "Module";

pub struct TaskCoordinator {
    db: DatabaseConnection,
}

impl TaskCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            db: app_data.db.clone(),
        }
    }

    pub async fn list(&self, params: ListParams) -> Result<TaskListResponse, InternalError> {
        let page = listing_store::list::<task::Entity, _>(&self.db, &params).await?;

        let module_ids = page.items.iter().map(|t| t.module_id.clone()).collect();
        let modules = module_names(&self.db, module_ids).await?;
        let page = page.map(|t| to_response(t, &modules));

        Ok(TaskListResponse {
            count: page.count,
            list: page.items,
        })
    }

    pub async fn get(&self, task_id: &str) -> Result<TaskResponse, InternalError> {
        let task = find(&self.db, task_id).await?;
        let modules = module_names(&self.db, vec![task.module_id.clone()]).await?;
        Ok(to_response(task, &modules))
    }

    /// New tasks start as PENDING
    pub async fn add(&self, request: TaskRequest) -> Result<String, InternalError> {
        let txn = begin_transaction(&self.db).await?;

        ensure_module(&txn, &request.module_id).await?;
        let task = task_store::insert(&txn, fields(request), TaskStatus::Pending).await?;

        commit_transaction(txn).await?;
        tracing::info!(task_id = %task.id, "Task created");

        Ok(task.id)
    }

    pub async fn update(&self, task_id: &str, request: TaskRequest) -> Result<(), InternalError> {
        let txn = begin_transaction(&self.db).await?;

        let task = find(&txn, task_id).await?;
        ensure_module(&txn, &request.module_id).await?;
        task_store::update(&txn, task, fields(request)).await?;

        commit_transaction(txn).await
    }

    pub async fn set_status(&self, task_id: &str, status: TaskStatus) -> Result<(), InternalError> {
        let task = find(&self.db, task_id).await?;
        task_store::set_status(&self.db, task, status).await?;
        Ok(())
    }

    pub async fn delete(&self, task_id: &str) -> Result<(), InternalError> {
        let task = find(&self.db, task_id).await?;
        task_store::soft_delete(&self.db, task).await
    }
}

fn fields(request: TaskRequest) -> TaskFields {
    TaskFields {
        name: request.name,
        description: request.description,
        module_id: request.module_id,
    }
}

fn to_response(task: task::Model, modules: &HashMap<String, String>) -> TaskResponse {
    TaskResponse {
        module: Reference {
            name: modules.get(&task.module_id).cloned().unwrap_or_default(),
            id: task.module_id,
        },
        id: task.id,
        name: task.name,
        description: task.description,
        status: task.status,
    }
}

async fn module_names(
    conn: &impl ConnectionTrait,
    ids: Vec<String>,
) -> Result<HashMap<String, String>, InternalError> {
    listing_store::names_by_id::<module::Entity, _>(conn, ids, module::Column::Id, module::Column::Name)
        .await
}

async fn ensure_module(conn: &impl ConnectionTrait, module_id: &str) -> Result<(), InternalError> {
    match listing_store::find_active::<module::Entity, _>(conn, module_id).await? {
        Some(_) => Ok(()),
        None => Err(ResourceError::not_found(MODULE, module_id).into()),
    }
}

async fn find(conn: &impl ConnectionTrait, task_id: &str) -> Result<task::Model, InternalError> {
    listing_store::find_active::<task::Entity, _>(conn, task_id)
        .await?
        .ok_or_else(|| ResourceError::not_found(TASK, task_id).into())
}
