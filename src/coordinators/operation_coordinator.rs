use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::app_data::AppData;
use crate::errors::InternalError;
use crate::providers::AuthorizationProvider;
use crate::types::db::admin_user;
use crate::types::dto::operation::{OperationGroupResponse, PermissionsResponse};

/// Read-only views over the operation tree
pub struct OperationCoordinator {
    db: DatabaseConnection,
    authorization_provider: Arc<AuthorizationProvider>,
}

impl OperationCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            db: app_data.db.clone(),
            authorization_provider: app_data.providers.authorization_provider.clone(),
        }
    }

    /// Operations and menu headings the caller may use
    pub async fn permissions(
        &self,
        actor: &admin_user::Model,
    ) -> Result<PermissionsResponse, InternalError> {
        let permissions = self
            .authorization_provider
            .permissions_for(&self.db, &actor.id)
            .await?;
        Ok(permissions.into())
    }

    pub async fn all(&self) -> Result<Vec<OperationGroupResponse>, InternalError> {
        let groups = self.authorization_provider.operation_groups(&self.db).await?;
        Ok(groups.into_iter().map(Into::into).collect())
    }
}
