use std::collections::HashMap;
use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::app_data::AppData;
use crate::config::{begin_transaction, commit_transaction};
use crate::errors::InternalError;
use crate::errors::internal::{AuthorizationError, CredentialError};
use crate::providers::{AuthorizationProvider, CryptoProvider};
use crate::stores::admin_user_store::{self, NewAdminUser};
use crate::stores::listing_store;
use crate::types::db::admin_user;
use crate::types::dto::admin_user::{
    AdminUserAddRequest, AdminUserListResponse, AdminUserResponse, AdminUserSummary,
    AdminUserUpdateRequest, ChangePasswordRequest, ProfileResponse, ProfileUpdateRequest,
    ResetPasswordRequest,
};
use crate::types::internal::listing::ListParams;
use crate::types::internal::operation::permission;

/// Orchestrates self-service profile changes and admin user management
///
/// Management endpoints check the caller's permission first; creating a user
/// and linking its role happen in one transaction.
pub struct AdminUserCoordinator {
    db: DatabaseConnection,
    crypto_provider: Arc<CryptoProvider>,
    authorization_provider: Arc<AuthorizationProvider>,
}

impl AdminUserCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            db: app_data.db.clone(),
            crypto_provider: app_data.providers.crypto_provider.clone(),
            authorization_provider: app_data.providers.authorization_provider.clone(),
        }
    }

    pub fn profile(&self, actor: admin_user::Model) -> ProfileResponse {
        actor.into()
    }

    pub async fn update_profile(
        &self,
        actor: admin_user::Model,
        request: ProfileUpdateRequest,
    ) -> Result<ProfileResponse, InternalError> {
        let user = admin_user_store::update_details(&self.db, actor, request.name, None).await?;
        Ok(user.into())
    }

    pub async fn change_password(
        &self,
        actor: admin_user::Model,
        request: ChangePasswordRequest,
    ) -> Result<(), InternalError> {
        if !self
            .crypto_provider
            .verify_password(&request.old_password, &actor.password_hash)?
        {
            return Err(CredentialError::IncorrectPassword.into());
        }

        let password_hash = self.crypto_provider.hash_password(&request.new_password)?;
        let user = admin_user_store::set_password_hash(&self.db, actor, password_hash).await?;

        tracing::info!(admin_user_id = %user.id, "Password changed");
        Ok(())
    }

    pub async fn list(
        &self,
        actor: &admin_user::Model,
        params: ListParams,
    ) -> Result<AdminUserListResponse, InternalError> {
        self.authorization_provider
            .authorize(&self.db, &actor.id, permission::LIST_ADMIN_USERS)
            .await?;

        let page = listing_store::list::<admin_user::Entity, _>(&self.db, &params).await?;

        let ids: Vec<String> = page.items.iter().map(|user| user.id.clone()).collect();
        let mut roles: HashMap<String, _> = admin_user_store::find_roles(&self.db, &ids)
            .await?
            .into_iter()
            .collect();

        let page = page.map(|user| AdminUserResponse {
            role: roles.remove(&user.id).map(Into::into),
            id: user.id,
            name: user.name,
            email: user.email,
        });

        Ok(AdminUserListResponse {
            count: page.count,
            list: page.items,
        })
    }

    /// Id and name of every admin user, for pickers
    pub async fn all(&self) -> Result<Vec<AdminUserSummary>, InternalError> {
        let names = admin_user_store::list_names(&self.db).await?;
        Ok(names
            .into_iter()
            .map(|user| AdminUserSummary {
                id: user.id,
                name: user.name,
            })
            .collect())
    }

    pub async fn add(
        &self,
        actor: &admin_user::Model,
        request: AdminUserAddRequest,
    ) -> Result<String, InternalError> {
        self.authorization_provider
            .authorize(&self.db, &actor.id, permission::ADD_ADMIN_USER)
            .await?;

        let txn = begin_transaction(&self.db).await?;

        if admin_user_store::find_active_by_email(&txn, &request.email)
            .await?
            .is_some()
        {
            return Err(CredentialError::DuplicateEmail(request.email).into());
        }

        let role = self
            .authorization_provider
            .assignable_role(&txn, &request.role_id)
            .await?;

        let password_hash = self.crypto_provider.hash_password(&request.password)?;
        let user = admin_user_store::insert(
            &txn,
            NewAdminUser {
                name: request.name,
                email: request.email,
                password_hash,
            },
        )
        .await?;
        admin_user_store::assign_role(&txn, &user.id, &role.id).await?;

        commit_transaction(txn).await?;
        tracing::info!(admin_user_id = %user.id, created_by = %actor.id, "Admin user created");

        Ok(user.id)
    }

    pub async fn get(
        &self,
        actor: &admin_user::Model,
        admin_user_id: &str,
    ) -> Result<AdminUserResponse, InternalError> {
        self.authorization_provider
            .authorize(&self.db, &actor.id, permission::EDIT_ADMIN_USER)
            .await?;

        let user = self.find(admin_user_id).await?;
        let role = admin_user_store::find_role(&self.db, &user.id).await?;

        Ok(AdminUserResponse {
            id: user.id,
            name: user.name,
            email: user.email,
            role: role.map(Into::into),
        })
    }

    /// Update name, email and role
    ///
    /// The role link is only rewritten when the role changes, so an existing
    /// Super Admin keeps working, but no one can be moved onto that role.
    pub async fn update(
        &self,
        actor: &admin_user::Model,
        admin_user_id: &str,
        request: AdminUserUpdateRequest,
    ) -> Result<(), InternalError> {
        self.authorization_provider
            .authorize(&self.db, &actor.id, permission::EDIT_ADMIN_USER)
            .await?;

        let txn = begin_transaction(&self.db).await?;

        let user = admin_user_store::find_active_by_id(&txn, admin_user_id)
            .await?
            .ok_or_else(|| CredentialError::AdminUserNotFound(admin_user_id.to_string()))?;

        if user.email != request.email
            && admin_user_store::find_active_by_email(&txn, &request.email)
                .await?
                .is_some()
        {
            return Err(CredentialError::EmailTaken(request.email).into());
        }

        let current_role = admin_user_store::find_role(&txn, &user.id).await?;
        if current_role.as_ref().map(|role| role.id.as_str()) != Some(request.role_id.as_str()) {
            let role = self
                .authorization_provider
                .assignable_role(&txn, &request.role_id)
                .await?;
            admin_user_store::assign_role(&txn, &user.id, &role.id).await?;
        }

        admin_user_store::update_details(&txn, user, request.name, Some(request.email)).await?;
        commit_transaction(txn).await?;

        tracing::info!(admin_user_id, updated_by = %actor.id, "Admin user updated");
        Ok(())
    }

    /// Soft delete an admin user; Super Admin accounts are protected
    pub async fn delete(
        &self,
        actor: &admin_user::Model,
        admin_user_id: &str,
    ) -> Result<(), InternalError> {
        self.authorization_provider
            .authorize(&self.db, &actor.id, permission::DELETE_ADMIN_USER)
            .await?;

        let user = self.find(admin_user_id).await?;
        if self
            .authorization_provider
            .is_super_admin(&self.db, &user.id)
            .await?
        {
            return Err(AuthorizationError::ProtectedAdminUser(user.id).into());
        }

        admin_user_store::soft_delete(&self.db, user).await?;

        tracing::info!(admin_user_id, deleted_by = %actor.id, "Admin user deleted");
        Ok(())
    }

    pub async fn reset_password(
        &self,
        actor: &admin_user::Model,
        admin_user_id: &str,
        request: ResetPasswordRequest,
    ) -> Result<(), InternalError> {
        self.authorization_provider
            .authorize(&self.db, &actor.id, permission::RESET_PASSWORD)
            .await?;

        let user = self.find(admin_user_id).await?;
        let password_hash = self.crypto_provider.hash_password(&request.new_password)?;
        admin_user_store::set_password_hash(&self.db, user, password_hash).await?;

        tracing::info!(admin_user_id, reset_by = %actor.id, "Admin user password reset");
        Ok(())
    }

    async fn find(&self, admin_user_id: &str) -> Result<admin_user::Model, InternalError> {
        admin_user_store::find_active_by_id(&self.db, admin_user_id)
            .await?
            .ok_or_else(|| CredentialError::AdminUserNotFound(admin_user_id.to_string()).into())
    }
}
