use std::sync::Arc;

use poem_openapi::param::{Path, Query};
use poem_openapi::{ApiResponse, OpenApi, Tags, payload::Json};

use crate::api::helpers::{Created, NoContent, SessionToken, authenticate, list_params};
use crate::app_data::AppData;
use crate::coordinators::{AuthCoordinator, IssueCoordinator};
use crate::errors::ApiError;
use crate::types::dto::common::{MemberAssignment, MessageResponse};
use crate::types::dto::issue::{IssueListResponse, IssueMembersResponse, IssueRequest, IssueResponse};

pub struct IssuesApi {
    auth_coordinator: AuthCoordinator,
    issue_coordinator: IssueCoordinator,
}

impl IssuesApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            auth_coordinator: AuthCoordinator::new(app_data.clone()),
            issue_coordinator: IssueCoordinator::new(app_data),
        }
    }
}

#[derive(Tags)]
enum IssueTags {
    Issues,
}

#[derive(ApiResponse)]
enum MembersAssigned {
    #[oai(status = 201)]
    Created(Json<MessageResponse>),
}

#[OpenApi]
impl IssuesApi {
    #[oai(path = "/issues", method = "get", tag = "IssueTags::Issues")]
    async fn list(
        &self,
        auth: SessionToken,
        start: Query<Option<u64>>,
        limit: Query<Option<u64>>,
        sort_by: Query<Option<String>>,
        order: Query<Option<String>>,
        search: Query<Option<String>>,
    ) -> Result<Json<IssueListResponse>, ApiError> {
        authenticate(&self.auth_coordinator, &auth).await?;
        let params = list_params(start.0, limit.0, sort_by.0, order.0, search.0);
        Ok(Json(self.issue_coordinator.list(params).await?))
    }

    /// Opens a new issue against an existing task
    #[oai(path = "/issues", method = "post", tag = "IssueTags::Issues")]
    async fn add(&self, auth: SessionToken, body: Json<IssueRequest>) -> Result<Created, ApiError> {
        authenticate(&self.auth_coordinator, &auth).await?;
        let id = self.issue_coordinator.add(body.0).await?;
        Ok(Created::id(id))
    }

    #[oai(path = "/issues/:id", method = "get", tag = "IssueTags::Issues")]
    async fn get(&self, auth: SessionToken, id: Path<String>) -> Result<Json<IssueResponse>, ApiError> {
        authenticate(&self.auth_coordinator, &auth).await?;
        Ok(Json(self.issue_coordinator.get(&id.0).await?))
    }

    #[oai(path = "/issues/:id", method = "put", tag = "IssueTags::Issues")]
    async fn update(
        &self,
        auth: SessionToken,
        id: Path<String>,
        body: Json<IssueRequest>,
    ) -> Result<NoContent, ApiError> {
        authenticate(&self.auth_coordinator, &auth).await?;
        self.issue_coordinator.update(&id.0, body.0).await?;
        Ok(NoContent::NoContent)
    }

    #[oai(path = "/issues/:id", method = "delete", tag = "IssueTags::Issues")]
    async fn delete(&self, auth: SessionToken, id: Path<String>) -> Result<NoContent, ApiError> {
        authenticate(&self.auth_coordinator, &auth).await?;
        self.issue_coordinator.delete(&id.0).await?;
        Ok(NoContent::NoContent)
    }

    #[oai(path = "/issues/:id/close", method = "patch", tag = "IssueTags::Issues")]
    async fn close(&self, auth: SessionToken, id: Path<String>) -> Result<Json<MessageResponse>, ApiError> {
        authenticate(&self.auth_coordinator, &auth).await?;
        self.issue_coordinator.close(&id.0).await?;
        Ok(Json(MessageResponse::new("Issue closed")))
    }

    #[oai(path = "/issues/:id/users", method = "get", tag = "IssueTags::Issues")]
    async fn members(
        &self,
        auth: SessionToken,
        id: Path<String>,
    ) -> Result<Json<IssueMembersResponse>, ApiError> {
        authenticate(&self.auth_coordinator, &auth).await?;
        Ok(Json(self.issue_coordinator.members(&id.0).await?))
    }

    #[oai(path = "/issues/:id/users", method = "post", tag = "IssueTags::Issues")]
    async fn add_members(
        &self,
        auth: SessionToken,
        id: Path<String>,
        body: Json<MemberAssignment>,
    ) -> Result<MembersAssigned, ApiError> {
        authenticate(&self.auth_coordinator, &auth).await?;
        self.issue_coordinator
            .add_members(&id.0, body.0.admin_user_ids)
            .await?;
        Ok(MembersAssigned::Created(Json(MessageResponse::new(
            "Users assigned to issue",
        ))))
    }

    #[oai(path = "/issues/:id/users", method = "delete", tag = "IssueTags::Issues")]
    async fn remove_members(
        &self,
        auth: SessionToken,
        id: Path<String>,
        body: Json<MemberAssignment>,
    ) -> Result<NoContent, ApiError> {
        authenticate(&self.auth_coordinator, &auth).await?;
        self.issue_coordinator
            .remove_members(&id.0, body.0.admin_user_ids)
            .await?;
        Ok(NoContent::NoContent)
    }
}
