use std::sync::Arc;

use poem_openapi::param::{Path, Query};
use poem_openapi::{OpenApi, Tags, payload::Json};

use crate::api::helpers::{Created, NoContent, SessionToken, authenticate, list_params};
use crate::app_data::AppData;
use crate::coordinators::{AuthCoordinator, ModuleCoordinator};
use crate::errors::ApiError;
use crate::types::dto::module::{ModuleListResponse, ModuleRequest, ModuleResponse};

pub struct ModulesApi {
    auth_coordinator: AuthCoordinator,
    module_coordinator: ModuleCoordinator,
}

impl ModulesApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            auth_coordinator: AuthCoordinator::new(app_data.clone()),
            module_coordinator: ModuleCoordinator::new(app_data),
        }
    }
}

#[derive(Tags)]
enum ModuleTags {
    Modules,
}

#[OpenApi]
impl ModulesApi {
    #[oai(path = "/modules", method = "get", tag = "ModuleTags::Modules")]
    async fn list(
        &self,
        auth: SessionToken,
        start: Query<Option<u64>>,
        limit: Query<Option<u64>>,
        sort_by: Query<Option<String>>,
        order: Query<Option<String>>,
        search: Query<Option<String>>,
    ) -> Result<Json<ModuleListResponse>, ApiError> {
        authenticate(&self.auth_coordinator, &auth).await?;
        let params = list_params(start.0, limit.0, sort_by.0, order.0, search.0);
        Ok(Json(self.module_coordinator.list(params).await?))
    }

    /// Project and module type must exist
    #[oai(path = "/modules", method = "post", tag = "ModuleTags::Modules")]
    async fn add(&self, auth: SessionToken, body: Json<ModuleRequest>) -> Result<Created, ApiError> {
        authenticate(&self.auth_coordinator, &auth).await?;
        let id = self.module_coordinator.add(body.0).await?;
        Ok(Created::id(id))
    }

    #[oai(path = "/modules/:id", method = "get", tag = "ModuleTags::Modules")]
    async fn get(&self, auth: SessionToken, id: Path<String>) -> Result<Json<ModuleResponse>, ApiError> {
        authenticate(&self.auth_coordinator, &auth).await?;
        Ok(Json(self.module_coordinator.get(&id.0).await?))
    }

    #[oai(path = "/modules/:id", method = "put", tag = "ModuleTags::Modules")]
    async fn update(
        &self,
        auth: SessionToken,
        id: Path<String>,
        body: Json<ModuleRequest>,
    ) -> Result<NoContent, ApiError> {
        authenticate(&self.auth_coordinator, &auth).await?;
        self.module_coordinator.update(&id.0, body.0).await?;
        Ok(NoContent::NoContent)
    }

    #[oai(path = "/modules/:id", method = "delete", tag = "ModuleTags::Modules")]
    async fn delete(&self, auth: SessionToken, id: Path<String>) -> Result<NoContent, ApiError> {
        authenticate(&self.auth_coordinator, &auth).await?;
        self.module_coordinator.delete(&id.0).await?;
        Ok(NoContent::NoContent)
    }
}
