use std::sync::Arc;

use sea_orm::{ConnectionTrait, DatabaseConnection};

use crate::app_data::AppData;
use crate::config::{begin_transaction, commit_transaction};
use crate::errors::InternalError;
use crate::errors::internal::AuthorizationError;
use crate::providers::AuthorizationProvider;
use crate::providers::authorization_provider::ensure_editable;
use crate::stores::{listing_store, role_store};
use crate::types::db::{admin_user, role};
use crate::types::dto::role::{RoleDetailsResponse, RoleListResponse, RoleRequest, RoleResponse};
use crate::types::internal::listing::ListParams;
use crate::types::internal::operation::permission;

/// Orchestrates role management
///
/// Renames and permission changes on one role are committed together.
pub struct RoleCoordinator {
    db: DatabaseConnection,
    authorization_provider: Arc<AuthorizationProvider>,
}

impl RoleCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            db: app_data.db.clone(),
            authorization_provider: app_data.providers.authorization_provider.clone(),
        }
    }

    pub async fn list(
        &self,
        actor: &admin_user::Model,
        params: ListParams,
    ) -> Result<RoleListResponse, InternalError> {
        self.authorization_provider
            .authorize(&self.db, &actor.id, permission::LIST_ROLES)
            .await?;

        let page = listing_store::list::<role::Entity, _>(&self.db, &params)
            .await?
            .map(RoleResponse::from);

        Ok(RoleListResponse {
            count: page.count,
            list: page.items,
        })
    }

    /// Roles that may be assigned to admin users
    pub async fn all(&self) -> Result<Vec<RoleResponse>, InternalError> {
        let roles = role_store::list_assignable(&self.db).await?;
        Ok(roles.into_iter().map(Into::into).collect())
    }

    pub async fn add(
        &self,
        actor: &admin_user::Model,
        request: RoleRequest,
    ) -> Result<RoleDetailsResponse, InternalError> {
        self.authorization_provider
            .authorize(&self.db, &actor.id, permission::ADD_ROLE)
            .await?;

        let txn = begin_transaction(&self.db).await?;

        self.authorization_provider
            .ensure_role_name_available(&txn, &request.name, None)
            .await?;

        let role = role_store::insert(&txn, &request.name, &request.name, true).await?;
        self.authorization_provider
            .set_role_operations(&txn, &role, &request.operations)
            .await?;
        let operations = role_store::granted_operations(&txn, &role.id).await?;

        commit_transaction(txn).await?;
        tracing::info!(role_id = %role.id, created_by = %actor.id, "Role created");

        Ok(RoleDetailsResponse {
            id: role.id,
            name: role.name,
            operations: operations.into_iter().map(Into::into).collect(),
        })
    }

    pub async fn get(
        &self,
        actor: &admin_user::Model,
        role_id: &str,
    ) -> Result<RoleDetailsResponse, InternalError> {
        self.authorization_provider
            .authorize(&self.db, &actor.id, permission::EDIT_ROLE)
            .await?;

        let role = find(&self.db, role_id).await?;
        let operations = role_store::granted_operations(&self.db, &role.id).await?;

        Ok(RoleDetailsResponse {
            id: role.id,
            name: role.name,
            operations: operations.into_iter().map(Into::into).collect(),
        })
    }

    /// Rename the role and replace its granted operations
    ///
    /// The name check only runs when the name changes other than by case.
    pub async fn update(
        &self,
        actor: &admin_user::Model,
        role_id: &str,
        request: RoleRequest,
    ) -> Result<(), InternalError> {
        self.authorization_provider
            .authorize(&self.db, &actor.id, permission::EDIT_ROLE)
            .await?;

        let txn = begin_transaction(&self.db).await?;

        let role = find(&txn, role_id).await?;
        ensure_editable(&role)?;

        if role.name.to_lowercase() != request.name.to_lowercase() {
            self.authorization_provider
                .ensure_role_name_available(&txn, &request.name, Some(&role.id))
                .await?;
        }

        let role = role_store::rename(&txn, role, request.name).await?;
        self.authorization_provider
            .set_role_operations(&txn, &role, &request.operations)
            .await?;

        commit_transaction(txn).await?;
        tracing::info!(role_id, updated_by = %actor.id, "Role updated");

        Ok(())
    }

    pub async fn delete(&self, actor: &admin_user::Model, role_id: &str) -> Result<(), InternalError> {
        self.authorization_provider
            .authorize(&self.db, &actor.id, permission::DELETE_ROLE)
            .await?;

        let role = find(&self.db, role_id).await?;
        ensure_editable(&role)?;
        role_store::soft_delete(&self.db, role).await?;

        tracing::info!(role_id, deleted_by = %actor.id, "Role deleted");
        Ok(())
    }
}

async fn find(
    conn: &impl ConnectionTrait,
    role_id: &str,
) -> Result<role::Model, InternalError> {
    role_store::find_active(conn, role_id)
        .await?
        .ok_or_else(|| AuthorizationError::RoleNotFound(role_id.to_string()).into())
}
