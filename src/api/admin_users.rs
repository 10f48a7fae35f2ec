use std::sync::Arc;

use poem_openapi::param::{Path, Query};
use poem_openapi::{OpenApi, Tags, payload::Json};

use crate::api::helpers::{Created, NoContent, SessionToken, authenticate, list_params};
use crate::app_data::AppData;
use crate::coordinators::{AdminUserCoordinator, AuthCoordinator};
use crate::errors::ApiError;
use crate::types::dto::admin_user::{
    AdminUserAddRequest, AdminUserListResponse, AdminUserResponse, AdminUserSummary,
    AdminUserUpdateRequest, ResetPasswordRequest,
};

/// Admin user management, guarded by the admin user operations
pub struct AdminUsersApi {
    auth_coordinator: AuthCoordinator,
    admin_user_coordinator: AdminUserCoordinator,
}

impl AdminUsersApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            auth_coordinator: AuthCoordinator::new(app_data.clone()),
            admin_user_coordinator: AdminUserCoordinator::new(app_data),
        }
    }
}

#[derive(Tags)]
enum AdminUserTags {
    /// Admin user management
    AdminUsers,
}

#[OpenApi]
impl AdminUsersApi {
    /// Requires "List Admin Users"
    #[oai(path = "/admin-users", method = "get", tag = "AdminUserTags::AdminUsers")]
    async fn list(
        &self,
        auth: SessionToken,
        start: Query<Option<u64>>,
        limit: Query<Option<u64>>,
        sort_by: Query<Option<String>>,
        order: Query<Option<String>>,
        search: Query<Option<String>>,
    ) -> Result<Json<AdminUserListResponse>, ApiError> {
        let actor = authenticate(&self.auth_coordinator, &auth).await?;
        let params = list_params(start.0, limit.0, sort_by.0, order.0, search.0);
        Ok(Json(self.admin_user_coordinator.list(&actor, params).await?))
    }

    /// Requires "Add Admin User"
    #[oai(path = "/admin-users", method = "post", tag = "AdminUserTags::AdminUsers")]
    async fn add(
        &self,
        auth: SessionToken,
        body: Json<AdminUserAddRequest>,
    ) -> Result<Created, ApiError> {
        let actor = authenticate(&self.auth_coordinator, &auth).await?;
        let id = self.admin_user_coordinator.add(&actor, body.0).await?;
        Ok(Created::id(id))
    }

    /// Every admin user's id and name
    #[oai(path = "/admin-users/all", method = "get", tag = "AdminUserTags::AdminUsers")]
    async fn all(&self, auth: SessionToken) -> Result<Json<Vec<AdminUserSummary>>, ApiError> {
        authenticate(&self.auth_coordinator, &auth).await?;
        Ok(Json(self.admin_user_coordinator.all().await?))
    }

    /// Requires "Edit Admin User"
    #[oai(path = "/admin-users/:id", method = "get", tag = "AdminUserTags::AdminUsers")]
    async fn get(
        &self,
        auth: SessionToken,
        id: Path<String>,
    ) -> Result<Json<AdminUserResponse>, ApiError> {
        let actor = authenticate(&self.auth_coordinator, &auth).await?;
        Ok(Json(self.admin_user_coordinator.get(&actor, &id.0).await?))
    }

    /// Requires "Edit Admin User"
    #[oai(path = "/admin-users/:id", method = "put", tag = "AdminUserTags::AdminUsers")]
    async fn update(
        &self,
        auth: SessionToken,
        id: Path<String>,
        body: Json<AdminUserUpdateRequest>,
    ) -> Result<NoContent, ApiError> {
        let actor = authenticate(&self.auth_coordinator, &auth).await?;
        self.admin_user_coordinator.update(&actor, &id.0, body.0).await?;
        Ok(NoContent::NoContent)
    }

    /// Requires "Delete Admin User"; Super Admin accounts cannot be deleted
    #[oai(path = "/admin-users/:id", method = "delete", tag = "AdminUserTags::AdminUsers")]
    async fn delete(&self, auth: SessionToken, id: Path<String>) -> Result<NoContent, ApiError> {
        let actor = authenticate(&self.auth_coordinator, &auth).await?;
        self.admin_user_coordinator.delete(&actor, &id.0).await?;
        Ok(NoContent::NoContent)
    }

    /// Requires "Reset Password"
    #[oai(
        path = "/admin-users/:id/reset-password",
        method = "put",
        tag = "AdminUserTags::AdminUsers"
    )]
    async fn reset_password(
        &self,
        auth: SessionToken,
        id: Path<String>,
        body: Json<ResetPasswordRequest>,
    ) -> Result<NoContent, ApiError> {
        let actor = authenticate(&self.auth_coordinator, &auth).await?;
        self.admin_user_coordinator
            .reset_password(&actor, &id.0, body.0)
            .await?;
        Ok(NoContent::NoContent)
    }
}
