use std::sync::Arc;

use poem_openapi::param::{Path, Query};
use poem_openapi::{ApiResponse, OpenApi, Tags, payload::Json};

use crate::api::helpers::{NoContent, SessionToken, authenticate, list_params};
use crate::app_data::AppData;
use crate::coordinators::{AuthCoordinator, RoleCoordinator};
use crate::errors::ApiError;
use crate::types::dto::role::{RoleDetailsResponse, RoleListResponse, RoleRequest, RoleResponse};

pub struct RolesApi {
    auth_coordinator: AuthCoordinator,
    role_coordinator: RoleCoordinator,
}

impl RolesApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            auth_coordinator: AuthCoordinator::new(app_data.clone()),
            role_coordinator: RoleCoordinator::new(app_data),
        }
    }
}

#[derive(Tags)]
enum RoleTags {
    /// Role and permission management
    Roles,
}

#[derive(ApiResponse)]
enum RoleCreated {
    #[oai(status = 201)]
    Created(Json<RoleDetailsResponse>),
}

#[OpenApi]
impl RolesApi {
    /// Requires "List Roles"
    #[oai(path = "/roles", method = "get", tag = "RoleTags::Roles")]
    async fn list(
        &self,
        auth: SessionToken,
        start: Query<Option<u64>>,
        limit: Query<Option<u64>>,
        sort_by: Query<Option<String>>,
        order: Query<Option<String>>,
        search: Query<Option<String>>,
    ) -> Result<Json<RoleListResponse>, ApiError> {
        let actor = authenticate(&self.auth_coordinator, &auth).await?;
        let params = list_params(start.0, limit.0, sort_by.0, order.0, search.0);
        Ok(Json(self.role_coordinator.list(&actor, params).await?))
    }

    /// Editable roles, for assigning to admin users
    #[oai(path = "/roles/all", method = "get", tag = "RoleTags::Roles")]
    async fn all(&self, auth: SessionToken) -> Result<Json<Vec<RoleResponse>>, ApiError> {
        authenticate(&self.auth_coordinator, &auth).await?;
        Ok(Json(self.role_coordinator.all().await?))
    }

    /// Requires "Add Role"
    #[oai(path = "/roles", method = "post", tag = "RoleTags::Roles")]
    async fn add(&self, auth: SessionToken, body: Json<RoleRequest>) -> Result<RoleCreated, ApiError> {
        let actor = authenticate(&self.auth_coordinator, &auth).await?;
        let role = self.role_coordinator.add(&actor, body.0).await?;
        Ok(RoleCreated::Created(Json(role)))
    }

    /// Requires "Edit Role"
    #[oai(path = "/roles/:id", method = "get", tag = "RoleTags::Roles")]
    async fn get(
        &self,
        auth: SessionToken,
        id: Path<String>,
    ) -> Result<Json<RoleDetailsResponse>, ApiError> {
        let actor = authenticate(&self.auth_coordinator, &auth).await?;
        Ok(Json(self.role_coordinator.get(&actor, &id.0).await?))
    }

    /// Requires "Edit Role"; protected roles are rejected
    #[oai(path = "/roles/:id", method = "put", tag = "RoleTags::Roles")]
    async fn update(
        &self,
        auth: SessionToken,
        id: Path<String>,
        body: Json<RoleRequest>,
    ) -> Result<NoContent, ApiError> {
        let actor = authenticate(&self.auth_coordinator, &auth).await?;
        self.role_coordinator.update(&actor, &id.0, body.0).await?;
        Ok(NoContent::NoContent)
    }

    /// Requires "Delete Role"; protected roles are rejected
    #[oai(path = "/roles/:id", method = "delete", tag = "RoleTags::Roles")]
    async fn delete(&self, auth: SessionToken, id: Path<String>) -> Result<NoContent, ApiError> {
        let actor = authenticate(&self.auth_coordinator, &auth).await?;
        self.role_coordinator.delete(&actor, &id.0).await?;
        Ok(NoContent::NoContent)
    }
}
