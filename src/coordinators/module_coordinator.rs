use std::collections::HashMap;
use std::sync::Arc;

use sea_orm::{ConnectionTrait, DatabaseConnection};

use crate::app_data::AppData;
use crate::config::{begin_transaction, commit_transaction};
use crate::errors::InternalError;
use crate::errors::internal::ResourceError;
use crate::stores::module_store::{self, ModuleFields};
use crate::stores::{listing_store, module_type_store};
use crate::types::db::{module, module_type, project};
use crate::types::dto::common::Reference;
use crate::types::dto::module::{
    ModuleListResponse, ModuleRequest, ModuleResponse, ModuleTypeListResponse, ModuleTypeRequest,
    ModuleTypeResponse,
};
use crate::types::internal::listing::ListParams;

const MODULE: &str = "Module";
const MODULE_TYPE: &str = "Module type";
const PROJECT: &str = "Project";

/// Module type and module management
pub struct ModuleCoordinator {
    db: DatabaseConnection,
}

impl ModuleCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            db: app_data.db.clone(),
        }
    }

    pub async fn list_types(
        &self,
        params: ListParams,
    ) -> Result<ModuleTypeListResponse, InternalError> {
        let page = listing_store::list::<module_type::Entity, _>(&self.db, &params)
            .await?
            .map(ModuleTypeResponse::from);

        Ok(ModuleTypeListResponse {
            count: page.count,
            list: page.items,
        })
    }

    pub async fn get_type(&self, module_type_id: &str) -> Result<ModuleTypeResponse, InternalError> {
        Ok(find_type(&self.db, module_type_id).await?.into())
    }

    pub async fn add_type(&self, request: ModuleTypeRequest) -> Result<String, InternalError> {
        let txn = begin_transaction(&self.db).await?;

        if module_type_store::find_active_by_name(&txn, &request.name)
            .await?
            .is_some()
        {
            return Err(ResourceError::duplicate(MODULE_TYPE, request.name).into());
        }

        let module_type = module_type_store::insert(&txn, request.name).await?;
        commit_transaction(txn).await?;

        Ok(module_type.id)
    }

    pub async fn update_type(
        &self,
        module_type_id: &str,
        request: ModuleTypeRequest,
    ) -> Result<(), InternalError> {
        let txn = begin_transaction(&self.db).await?;

        let module_type = find_type(&txn, module_type_id).await?;
        if let Some(existing) = module_type_store::find_active_by_name(&txn, &request.name).await? {
            if existing.id != module_type.id {
                return Err(ResourceError::duplicate(MODULE_TYPE, request.name).into());
            }
        }

        module_type_store::rename(&txn, module_type, request.name).await?;
        commit_transaction(txn).await
    }

    pub async fn delete_type(&self, module_type_id: &str) -> Result<(), InternalError> {
        let module_type = find_type(&self.db, module_type_id).await?;
        module_type_store::soft_delete(&self.db, module_type).await
    }

    pub async fn list(&self, params: ListParams) -> Result<ModuleListResponse, InternalError> {
        let page = listing_store::list::<module::Entity, _>(&self.db, &params).await?;

        let names = RelatedNames::load(&self.db, &page.items).await?;
        let page = page.map(|m| names.response(m));

        Ok(ModuleListResponse {
            count: page.count,
            list: page.items,
        })
    }

    pub async fn get(&self, module_id: &str) -> Result<ModuleResponse, InternalError> {
        let module = find(&self.db, module_id).await?;
        let names = RelatedNames::load(&self.db, std::slice::from_ref(&module)).await?;
        Ok(names.response(module))
    }

    pub async fn add(&self, request: ModuleRequest) -> Result<String, InternalError> {
        let txn = begin_transaction(&self.db).await?;

        ensure_parents(&txn, &request).await?;
        let module = module_store::insert(&txn, fields(request)).await?;

        commit_transaction(txn).await?;
        tracing::info!(module_id = %module.id, "Module created");

        Ok(module.id)
    }

    pub async fn update(&self, module_id: &str, request: ModuleRequest) -> Result<(), InternalError> {
        let txn = begin_transaction(&self.db).await?;

        let module = find(&txn, module_id).await?;
        ensure_parents(&txn, &request).await?;
        module_store::update(&txn, module, fields(request)).await?;

        commit_transaction(txn).await
    }

    pub async fn delete(&self, module_id: &str) -> Result<(), InternalError> {
        let module = find(&self.db, module_id).await?;
        module_store::soft_delete(&self.db, module).await
    }
}

/// Project and module type names for a batch of modules
struct RelatedNames {
    projects: HashMap<String, String>,
    module_types: HashMap<String, String>,
}

impl RelatedNames {
    async fn load(
        conn: &impl ConnectionTrait,
        modules: &[module::Model],
    ) -> Result<Self, InternalError> {
        let projects = listing_store::names_by_id::<project::Entity, _>(
            conn,
            modules.iter().map(|m| m.project_id.clone()).collect(),
            project::Column::Id,
            project::Column::Name,
        )
        .await?;

        let module_types = listing_store::names_by_id::<module_type::Entity, _>(
            conn,
            modules.iter().map(|m| m.module_type_id.clone()).collect(),
            module_type::Column::Id,
            module_type::Column::Name,
        )
        .await?;

        Ok(Self {
            projects,
            module_types,
        })
    }

    fn response(&self, module: module::Model) -> ModuleResponse {
        ModuleResponse {
            project: Reference {
                name: self.projects.get(&module.project_id).cloned().unwrap_or_default(),
                id: module.project_id,
            },
            module_type: Reference {
                name: self
                    .module_types
                    .get(&module.module_type_id)
                    .cloned()
                    .unwrap_or_default(),
                id: module.module_type_id,
            },
            id: module.id,
            name: module.name,
            description: module.description,
        }
    }
}

fn fields(request: ModuleRequest) -> ModuleFields {
    ModuleFields {
        name: request.name,
        description: request.description,
        project_id: request.project_id,
        module_type_id: request.module_type_id,
    }
}

async fn ensure_parents(conn: &impl ConnectionTrait, request: &ModuleRequest) -> Result<(), InternalError> {
    if listing_store::find_active::<project::Entity, _>(conn, &request.project_id)
        .await?
        .is_none()
    {
        return Err(ResourceError::not_found(PROJECT, request.project_id.clone()).into());
    }

    find_type(conn, &request.module_type_id).await?;
    Ok(())
}

async fn find(conn: &impl ConnectionTrait, module_id: &str) -> Result<module::Model, InternalError> {
    listing_store::find_active::<module::Entity, _>(conn, module_id)
        .await?
        .ok_or_else(|| ResourceError::not_found(MODULE, module_id).into())
}

async fn find_type(
    conn: &impl ConnectionTrait,
    module_type_id: &str,
) -> Result<module_type::Model, InternalError> {
    listing_store::find_active::<module_type::Entity, _>(conn, module_type_id)
        .await?
        .ok_or_else(|| ResourceError::not_found(MODULE_TYPE, module_type_id).into())
}
