use std::sync::Arc;

use poem_openapi::{OpenApi, Tags, payload::Json};

use crate::api::helpers::{NoContent, SessionToken, authenticate};
use crate::app_data::AppData;
use crate::coordinators::{AdminUserCoordinator, AuthCoordinator};
use crate::errors::ApiError;
use crate::types::dto::admin_user::{ChangePasswordRequest, ProfileResponse, ProfileUpdateRequest};

/// The caller's own account
pub struct ProfileApi {
    auth_coordinator: AuthCoordinator,
    admin_user_coordinator: AdminUserCoordinator,
}

impl ProfileApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            auth_coordinator: AuthCoordinator::new(app_data.clone()),
            admin_user_coordinator: AdminUserCoordinator::new(app_data),
        }
    }
}

#[derive(Tags)]
enum ProfileTags {
    Profile,
}

#[OpenApi]
impl ProfileApi {
    #[oai(path = "/admin-user", method = "get", tag = "ProfileTags::Profile")]
    async fn profile(&self, auth: SessionToken) -> Result<Json<ProfileResponse>, ApiError> {
        let actor = authenticate(&self.auth_coordinator, &auth).await?;
        Ok(Json(self.admin_user_coordinator.profile(actor)))
    }

    #[oai(path = "/admin-user", method = "put", tag = "ProfileTags::Profile")]
    async fn update_profile(
        &self,
        auth: SessionToken,
        body: Json<ProfileUpdateRequest>,
    ) -> Result<Json<ProfileResponse>, ApiError> {
        let actor = authenticate(&self.auth_coordinator, &auth).await?;
        Ok(Json(self.admin_user_coordinator.update_profile(actor, body.0).await?))
    }

    #[oai(path = "/admin-user/change-password", method = "put", tag = "ProfileTags::Profile")]
    async fn change_password(
        &self,
        auth: SessionToken,
        body: Json<ChangePasswordRequest>,
    ) -> Result<NoContent, ApiError> {
        let actor = authenticate(&self.auth_coordinator, &auth).await?;
        self.admin_user_coordinator.change_password(actor, body.0).await?;
        Ok(NoContent::NoContent)
    }
}
