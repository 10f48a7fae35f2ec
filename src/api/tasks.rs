use std::sync::Arc;

use poem_openapi::param::{Path, Query};
use poem_openapi::{OpenApi, Tags, payload::Json};

use crate::api::helpers::{Created, NoContent, SessionToken, authenticate, list_params};
use crate::app_data::AppData;
use crate::coordinators::{AuthCoordinator, TaskCoordinator};
use crate::errors::ApiError;
use crate::types::dto::task::{TaskListResponse, TaskRequest, TaskResponse, TaskStatusRequest};

pub struct TasksApi {
    auth_coordinator: AuthCoordinator,
    task_coordinator: TaskCoordinator,
}

impl TasksApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            auth_coordinator: AuthCoordinator::new(app_data.clone()),
            task_coordinator: TaskCoordinator::new(app_data),
        }
    }
}

#[derive(Tags)]
enum TaskTags {
    Tasks,
}

#[OpenApi]
impl TasksApi {
    #[oai(path = "/tasks", method = "get", tag = "TaskTags::Tasks")]
    async fn list(
        &self,
        auth: SessionToken,
        start: Query<Option<u64>>,
        limit: Query<Option<u64>>,
        sort_by: Query<Option<String>>,
        order: Query<Option<String>>,
        search: Query<Option<String>>,
    ) -> Result<Json<TaskListResponse>, ApiError> {
        authenticate(&self.auth_coordinator, &auth).await?;
        let params = list_params(start.0, limit.0, sort_by.0, order.0, search.0);
        Ok(Json(self.task_coordinator.list(params).await?))
    }

    #[oai(path = "/tasks", method = "post", tag = "TaskTags::Tasks")]
    async fn add(&self, auth: SessionToken, body: Json<TaskRequest>) -> Result<Created, ApiError> {
        authenticate(&self.auth_coordinator, &auth).await?;
        let id = self.task_coordinator.add(body.0).await?;
        Ok(Created::id(id))
    }

    #[oai(path = "/tasks/:id", method = "get", tag = "TaskTags::Tasks")]
    async fn get(&self, auth: SessionToken, id: Path<String>) -> Result<Json<TaskResponse>, ApiError> {
        authenticate(&self.auth_coordinator, &auth).await?;
        Ok(Json(self.task_coordinator.get(&id.0).await?))
    }

    #[oai(path = "/tasks/:id", method = "put", tag = "TaskTags::Tasks")]
    async fn update(
        &self,
        auth: SessionToken,
        id: Path<String>,
        body: Json<TaskRequest>,
    ) -> Result<NoContent, ApiError> {
        authenticate(&self.auth_coordinator, &auth).await?;
        self.task_coordinator.update(&id.0, body.0).await?;
        Ok(NoContent::NoContent)
    }

    #[oai(path = "/tasks/:id", method = "delete", tag = "TaskTags::Tasks")]
    async fn delete(&self, auth: SessionToken, id: Path<String>) -> Result<NoContent, ApiError> {
        authenticate(&self.auth_coordinator, &auth).await?;
        self.task_coordinator.delete(&id.0).await?;
        Ok(NoContent::NoContent)
    }

    #[oai(path = "/tasks/:id/status", method = "put", tag = "TaskTags::Tasks")]
    async fn set_status(
        &self,
        auth: SessionToken,
        id: Path<String>,
        body: Json<TaskStatusRequest>,
    ) -> Result<NoContent, ApiError> {
        authenticate(&self.auth_coordinator, &auth).await?;
        self.task_coordinator.set_status(&id.0, body.0.status).await?;
        Ok(NoContent::NoContent)
    }
}
