use std::sync::Arc;

use poem_openapi::param::{Path, Query};
use poem_openapi::{OpenApi, Tags, payload::Json};

use crate::api::helpers::{Created, NoContent, SessionToken, authenticate, list_params};
use crate::app_data::AppData;
use crate::coordinators::{AuthCoordinator, ModuleCoordinator};
use crate::errors::ApiError;
use crate::types::dto::module::{ModuleTypeListResponse, ModuleTypeRequest, ModuleTypeResponse};

pub struct ModuleTypesApi {
    auth_coordinator: AuthCoordinator,
    module_coordinator: ModuleCoordinator,
}

impl ModuleTypesApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            auth_coordinator: AuthCoordinator::new(app_data.clone()),
            module_coordinator: ModuleCoordinator::new(app_data),
        }
    }
}

#[derive(Tags)]
enum ModuleTypeTags {
    ModuleTypes,
}

#[OpenApi]
impl ModuleTypesApi {
    #[oai(path = "/module-types", method = "get", tag = "ModuleTypeTags::ModuleTypes")]
    async fn list(
        &self,
        auth: SessionToken,
        start: Query<Option<u64>>,
        limit: Query<Option<u64>>,
        sort_by: Query<Option<String>>,
        order: Query<Option<String>>,
        search: Query<Option<String>>,
    ) -> Result<Json<ModuleTypeListResponse>, ApiError> {
        authenticate(&self.auth_coordinator, &auth).await?;
        let params = list_params(start.0, limit.0, sort_by.0, order.0, search.0);
        Ok(Json(self.module_coordinator.list_types(params).await?))
    }

    #[oai(path = "/module-types", method = "post", tag = "ModuleTypeTags::ModuleTypes")]
    async fn add(&self, auth: SessionToken, body: Json<ModuleTypeRequest>) -> Result<Created, ApiError> {
        authenticate(&self.auth_coordinator, &auth).await?;
        let id = self.module_coordinator.add_type(body.0).await?;
        Ok(Created::id(id))
    }

    #[oai(path = "/module-types/:id", method = "get", tag = "ModuleTypeTags::ModuleTypes")]
    async fn get(
        &self,
        auth: SessionToken,
        id: Path<String>,
    ) -> Result<Json<ModuleTypeResponse>, ApiError> {
        authenticate(&self.auth_coordinator, &auth).await?;
        Ok(Json(self.module_coordinator.get_type(&id.0).await?))
    }

    #[oai(path = "/module-types/:id", method = "put", tag = "ModuleTypeTags::ModuleTypes")]
    async fn update(
        &self,
        auth: SessionToken,
        id: Path<String>,
        body: Json<ModuleTypeRequest>,
    ) -> Result<NoContent, ApiError> {
        authenticate(&self.auth_coordinator, &auth).await?;
        self.module_coordinator.update_type(&id.0, body.0).await?;
        Ok(NoContent::NoContent)
    }

    #[oai(path = "/module-types/:id", method = "delete", tag = "ModuleTypeTags::ModuleTypes")]
    async fn delete(&self, auth: SessionToken, id: Path<String>) -> Result<NoContent, ApiError> {
        authenticate(&self.auth_coordinator, &auth).await?;
        self.module_coordinator.delete_type(&id.0).await?;
        Ok(NoContent::NoContent)
    }
}
