use std::collections::HashMap;
use std::sync::Arc;

use sea_orm::{ConnectionTrait, DatabaseConnection};

use crate::app_data::AppData;
use crate::config::{begin_transaction, commit_transaction};
use crate::errors::InternalError;
use crate::errors::internal::ResourceError;
use crate::stores::project_store::{self, ProjectFields};
use crate::stores::{admin_user_store, listing_store};
use crate::types::db::admin_user;
use crate::types::db::project::{self, ProjectStatus};
use crate::types::dto::common::Reference;
use crate::types::dto::project::{
    ProjectListResponse, ProjectMembersResponse, ProjectRequest, ProjectResponse,
};
use crate::types::internal::listing::ListParams;

const PROJECT: &str = "Project";
const ADMIN_USER: &str = "Admin user";

/// Project CRUD, status changes and member links
///
/// Any authenticated admin user may manage projects; no operation slug guards them.
pub struct ProjectCoordinator {
    db: DatabaseConnection,
}

impl ProjectCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            db: app_data.db.clone(),
        }
    }

    pub async fn list(&self, params: ListParams) -> Result<ProjectListResponse, InternalError> {
        let page = listing_store::list::<project::Entity, _>(&self.db, &params).await?;

        let manager_ids = page.items.iter().map(|p| p.manager_id.clone()).collect();
        let managers = manager_names(&self.db, manager_ids).await?;
        let page = page.map(|p| to_response(p, &managers));

        Ok(ProjectListResponse {
            count: page.count,
            list: page.items,
        })
    }

    pub async fn get(&self, project_id: &str) -> Result<ProjectResponse, InternalError> {
        let project = find(&self.db, project_id).await?;
        let managers = manager_names(&self.db, vec![project.manager_id.clone()]).await?;
        Ok(to_response(project, &managers))
    }

    pub async fn add(
        &self,
        actor: &admin_user::Model,
        request: ProjectRequest,
    ) -> Result<String, InternalError> {
        let txn = begin_transaction(&self.db).await?;

        if project_store::find_active_by_name(&txn, &request.name)
            .await?
            .is_some()
        {
            return Err(ResourceError::duplicate(PROJECT, request.name).into());
        }
        ensure_admin_user(&txn, &request.manager_id).await?;

        let project = project_store::insert(&txn, fields(request), ProjectStatus::Planning).await?;
        commit_transaction(txn).await?;

        tracing::info!(project_id = %project.id, created_by = %actor.id, "Project created");
        Ok(project.id)
    }

    pub async fn update(
        &self,
        actor: &admin_user::Model,
        project_id: &str,
        request: ProjectRequest,
    ) -> Result<(), InternalError> {
        let txn = begin_transaction(&self.db).await?;

        let project = find(&txn, project_id).await?;
        if let Some(existing) = project_store::find_active_by_name(&txn, &request.name).await? {
            if existing.id != project.id {
                return Err(ResourceError::duplicate(PROJECT, request.name).into());
            }
        }
        ensure_admin_user(&txn, &request.manager_id).await?;

        project_store::update(&txn, project, fields(request)).await?;
        commit_transaction(txn).await?;

        tracing::info!(project_id, updated_by = %actor.id, "Project updated");
        Ok(())
    }

    pub async fn set_status(
        &self,
        project_id: &str,
        status: ProjectStatus,
    ) -> Result<(), InternalError> {
        let project = find(&self.db, project_id).await?;
        project_store::set_status(&self.db, project, status).await?;
        Ok(())
    }

    pub async fn delete(
        &self,
        actor: &admin_user::Model,
        project_id: &str,
    ) -> Result<(), InternalError> {
        let project = find(&self.db, project_id).await?;
        project_store::soft_delete(&self.db, project).await?;

        tracing::info!(project_id, deleted_by = %actor.id, "Project deleted");
        Ok(())
    }

    pub async fn members(&self, project_id: &str) -> Result<ProjectMembersResponse, InternalError> {
        let project = find(&self.db, project_id).await?;
        let members = project_store::members(&self.db, &project.id).await?;

        Ok(ProjectMembersResponse {
            project_id: project.id,
            admin_users: members
                .into_iter()
                .map(|user| Reference {
                    id: user.id,
                    name: user.name,
                })
                .collect(),
        })
    }

    /// Link admin users; already linked users are skipped, unknown ones fail the whole call
    pub async fn add_members(
        &self,
        project_id: &str,
        admin_user_ids: Vec<String>,
    ) -> Result<(), InternalError> {
        let txn = begin_transaction(&self.db).await?;

        let project = find(&txn, project_id).await?;
        ensure_admin_users(&txn, &admin_user_ids).await?;
        project_store::add_members(&txn, &project.id, &admin_user_ids).await?;

        commit_transaction(txn).await
    }

    pub async fn remove_members(
        &self,
        project_id: &str,
        admin_user_ids: Vec<String>,
    ) -> Result<(), InternalError> {
        let project = find(&self.db, project_id).await?;
        let removed = project_store::remove_members(&self.db, &project.id, &admin_user_ids).await?;

        tracing::debug!(project_id, removed, "Project members removed");
        Ok(())
    }
}

fn fields(request: ProjectRequest) -> ProjectFields {
    ProjectFields {
        name: request.name,
        description: request.description,
        start_date: request.start_date,
        end_date: request.end_date,
        manager_id: request.manager_id,
    }
}

fn to_response(project: project::Model, managers: &HashMap<String, String>) -> ProjectResponse {
    let manager = Reference {
        name: managers.get(&project.manager_id).cloned().unwrap_or_default(),
        id: project.manager_id,
    };

    ProjectResponse {
        id: project.id,
        name: project.name,
        description: project.description,
        start_date: project.start_date,
        end_date: project.end_date,
        status: project.status,
        manager,
    }
}

async fn manager_names(
    conn: &impl ConnectionTrait,
    ids: Vec<String>,
) -> Result<HashMap<String, String>, InternalError> {
    listing_store::names_by_id::<admin_user::Entity, _>(
        conn,
        ids,
        admin_user::Column::Id,
        admin_user::Column::Name,
    )
    .await
}

async fn find(conn: &impl ConnectionTrait, project_id: &str) -> Result<project::Model, InternalError> {
    listing_store::find_active::<project::Entity, _>(conn, project_id)
        .await?
        .ok_or_else(|| ResourceError::not_found(PROJECT, project_id).into())
}

async fn ensure_admin_user(conn: &impl ConnectionTrait, admin_user_id: &str) -> Result<(), InternalError> {
    match admin_user_store::find_active_by_id(conn, admin_user_id).await? {
        Some(_) => Ok(()),
        None => Err(ResourceError::not_found(ADMIN_USER, admin_user_id).into()),
    }
}

pub(crate) async fn ensure_admin_users(
    conn: &impl ConnectionTrait,
    admin_user_ids: &[String],
) -> Result<(), InternalError> {
    let existing = admin_user_store::existing_ids(conn, admin_user_ids).await?;
    match admin_user_ids.iter().find(|id| !existing.contains(id)) {
        Some(missing) => Err(ResourceError::not_found(ADMIN_USER, missing.clone()).into()),
        None => Ok(()),
    }
}
