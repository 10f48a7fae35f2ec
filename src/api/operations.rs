use std::sync::Arc;

use poem_openapi::{OpenApi, Tags, payload::Json};

use crate::api::helpers::{SessionToken, authenticate};
use crate::app_data::AppData;
use crate::coordinators::{AuthCoordinator, OperationCoordinator};
use crate::errors::ApiError;
use crate::types::dto::operation::{OperationGroupResponse, PermissionsResponse};

pub struct OperationsApi {
    auth_coordinator: AuthCoordinator,
    operation_coordinator: OperationCoordinator,
}

impl OperationsApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            auth_coordinator: AuthCoordinator::new(app_data.clone()),
            operation_coordinator: OperationCoordinator::new(app_data),
        }
    }
}

#[derive(Tags)]
enum OperationTags {
    /// Permission tree
    Operations,
}

#[OpenApi]
impl OperationsApi {
    /// Operations granted to the caller and the menu headings they fall under
    #[oai(path = "/operations", method = "get", tag = "OperationTags::Operations")]
    async fn permissions(&self, auth: SessionToken) -> Result<Json<PermissionsResponse>, ApiError> {
        let actor = authenticate(&self.auth_coordinator, &auth).await?;
        Ok(Json(self.operation_coordinator.permissions(&actor).await?))
    }

    /// Full operation tree, for editing roles
    #[oai(path = "/operations/all", method = "get", tag = "OperationTags::Operations")]
    async fn all(&self, auth: SessionToken) -> Result<Json<Vec<OperationGroupResponse>>, ApiError> {
        authenticate(&self.auth_coordinator, &auth).await?;
        Ok(Json(self.operation_coordinator.all().await?))
    }
}
