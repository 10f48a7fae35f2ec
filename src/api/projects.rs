use std::sync::Arc;

use poem_openapi::param::{Path, Query};
use poem_openapi::{ApiResponse, OpenApi, Tags, payload::Json};

use crate::api::helpers::{Created, NoContent, SessionToken, authenticate, list_params};
use crate::app_data::AppData;
use crate::coordinators::{AuthCoordinator, ProjectCoordinator};
use crate::errors::ApiError;
use crate::types::dto::common::{MemberAssignment, MessageResponse};
use crate::types::dto::project::{
    ProjectListResponse, ProjectMembersResponse, ProjectRequest, ProjectResponse,
    ProjectStatusRequest,
};

/// Project endpoints; any authenticated admin user may call them
pub struct ProjectsApi {
    auth_coordinator: AuthCoordinator,
    project_coordinator: ProjectCoordinator,
}

impl ProjectsApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            auth_coordinator: AuthCoordinator::new(app_data.clone()),
            project_coordinator: ProjectCoordinator::new(app_data),
        }
    }
}

#[derive(Tags)]
enum ProjectTags {
    Projects,
}

#[derive(ApiResponse)]
enum MembersAssigned {
    #[oai(status = 201)]
    Created(Json<MessageResponse>),
}

#[OpenApi]
impl ProjectsApi {
    #[oai(path = "/projects", method = "get", tag = "ProjectTags::Projects")]
    async fn list(
        &self,
        auth: SessionToken,
        start: Query<Option<u64>>,
        limit: Query<Option<u64>>,
        sort_by: Query<Option<String>>,
        order: Query<Option<String>>,
        search: Query<Option<String>>,
    ) -> Result<Json<ProjectListResponse>, ApiError> {
        authenticate(&self.auth_coordinator, &auth).await?;
        let params = list_params(start.0, limit.0, sort_by.0, order.0, search.0);
        Ok(Json(self.project_coordinator.list(params).await?))
    }

    #[oai(path = "/projects", method = "post", tag = "ProjectTags::Projects")]
    async fn add(&self, auth: SessionToken, body: Json<ProjectRequest>) -> Result<Created, ApiError> {
        let actor = authenticate(&self.auth_coordinator, &auth).await?;
        let id = self.project_coordinator.add(&actor, body.0).await?;
        Ok(Created::id(id))
    }

    #[oai(path = "/projects/:id", method = "get", tag = "ProjectTags::Projects")]
    async fn get(&self, auth: SessionToken, id: Path<String>) -> Result<Json<ProjectResponse>, ApiError> {
        authenticate(&self.auth_coordinator, &auth).await?;
        Ok(Json(self.project_coordinator.get(&id.0).await?))
    }

    #[oai(path = "/projects/:id", method = "put", tag = "ProjectTags::Projects")]
    async fn update(
        &self,
        auth: SessionToken,
        id: Path<String>,
        body: Json<ProjectRequest>,
    ) -> Result<NoContent, ApiError> {
        let actor = authenticate(&self.auth_coordinator, &auth).await?;
        self.project_coordinator.update(&actor, &id.0, body.0).await?;
        Ok(NoContent::NoContent)
    }

    #[oai(path = "/projects/:id", method = "delete", tag = "ProjectTags::Projects")]
    async fn delete(&self, auth: SessionToken, id: Path<String>) -> Result<NoContent, ApiError> {
        let actor = authenticate(&self.auth_coordinator, &auth).await?;
        self.project_coordinator.delete(&actor, &id.0).await?;
        Ok(NoContent::NoContent)
    }

    #[oai(path = "/projects/:id/status", method = "put", tag = "ProjectTags::Projects")]
    async fn set_status(
        &self,
        auth: SessionToken,
        id: Path<String>,
        body: Json<ProjectStatusRequest>,
    ) -> Result<NoContent, ApiError> {
        authenticate(&self.auth_coordinator, &auth).await?;
        self.project_coordinator.set_status(&id.0, body.0.status).await?;
        Ok(NoContent::NoContent)
    }

    #[oai(path = "/projects/:id/users", method = "get", tag = "ProjectTags::Projects")]
    async fn members(
        &self,
        auth: SessionToken,
        id: Path<String>,
    ) -> Result<Json<ProjectMembersResponse>, ApiError> {
        authenticate(&self.auth_coordinator, &auth).await?;
        Ok(Json(self.project_coordinator.members(&id.0).await?))
    }

    /// Link admin users to the project; existing links are kept
    #[oai(path = "/projects/:id/users", method = "post", tag = "ProjectTags::Projects")]
    async fn add_members(
        &self,
        auth: SessionToken,
        id: Path<String>,
        body: Json<MemberAssignment>,
    ) -> Result<MembersAssigned, ApiError> {
        authenticate(&self.auth_coordinator, &auth).await?;
        self.project_coordinator
            .add_members(&id.0, body.0.admin_user_ids)
            .await?;
        Ok(MembersAssigned::Created(Json(MessageResponse::new(
            "Users assigned to project",
        ))))
    }

    #[oai(path = "/projects/:id/users", method = "delete", tag = "ProjectTags::Projects")]
    async fn remove_members(
        &self,
        auth: SessionToken,
        id: Path<String>,
        body: Json<MemberAssignment>,
    ) -> Result<NoContent, ApiError> {
        authenticate(&self.auth_coordinator, &auth).await?;
        self.project_coordinator
            .remove_members(&id.0, body.0.admin_user_ids)
            .await?;
        Ok(NoContent::NoContent)
    }
}
