use sea_orm::ConnectionTrait;

use crate::errors::InternalError;
use crate::errors::internal::AuthorizationError;
use crate::stores::{admin_user_store, operation_store, role_store};
use crate::types::db::{operation as operation_model, role};
use crate::types::internal::operation::{OperationGroup, OperationNode, PermissionSet};

/// Role based access control over the Role / Operation graph
///
/// Holds no state; every answer is read from the connection it is given.
#[derive(Debug, Default, Clone)]
pub struct AuthorizationProvider;

impl AuthorizationProvider {
    pub fn new() -> Self {
        Self
    }

    /// True when the admin user's current role is the Super Admin role
    ///
    /// A user without a role is not a super admin.
    pub async fn is_super_admin(
        &self,
        conn: &impl ConnectionTrait,
        admin_user_id: &str,
    ) -> Result<bool, InternalError> {
        let role = admin_user_store::find_role(conn, admin_user_id).await?;
        Ok(role.is_some_and(|role| role.is_super_admin()))
    }

    /// Allow when super admin or when the role grants `operation_slug`
    ///
    /// # Errors
    /// `AuthorizationError::PermissionDenied` when not allowed
    pub async fn authorize(
        &self,
        conn: &impl ConnectionTrait,
        admin_user_id: &str,
        operation_slug: &str,
    ) -> Result<(), InternalError> {
        if self.is_super_admin(conn, admin_user_id).await? {
            return Ok(());
        }

        if operation_store::is_granted(conn, admin_user_id, operation_slug).await? {
            return Ok(());
        }

        tracing::debug!(admin_user_id, operation_slug, "Operation not granted");
        Err(AuthorizationError::PermissionDenied {
            operation: operation_slug.to_string(),
        }
        .into())
    }

    /// Granted leaf slugs plus the headings that have at least one of them
    pub async fn permissions_for(
        &self,
        conn: &impl ConnectionTrait,
        admin_user_id: &str,
    ) -> Result<PermissionSet, InternalError> {
        let granted = if self.is_super_admin(conn, admin_user_id).await? {
            operation_store::leaves(conn).await?
        } else {
            operation_store::granted_leaves(conn, admin_user_id).await?
        };

        let groups = group_operations(
            operation_store::headings(conn).await?,
            granted.into_iter().map(OperationNode::from).collect(),
        );

        let mut permissions = PermissionSet::default();
        for group in groups {
            if group.operations.is_empty() {
                continue;
            }
            permissions.menu.push(group.heading.slug().to_string());
            permissions
                .operations
                .extend(group.operations.iter().map(|leaf| leaf.slug().to_string()));
        }

        Ok(permissions)
    }

    /// Every heading with all of its leaves, unfiltered
    pub async fn operation_groups(
        &self,
        conn: &impl ConnectionTrait,
    ) -> Result<Vec<OperationGroup>, InternalError> {
        let headings = operation_store::headings(conn).await?;
        let leaves = operation_store::leaves(conn).await?;

        Ok(group_operations(
            headings,
            leaves.into_iter().map(OperationNode::from).collect(),
        ))
    }

    /// Replace the role's granted operations
    ///
    /// Unknown operation ids fail with `OperationNotFound`.
    pub async fn set_role_operations(
        &self,
        conn: &impl ConnectionTrait,
        role: &role::Model,
        operation_ids: &[String],
    ) -> Result<(), InternalError> {
        ensure_editable(role)?;
        role_store::replace_operations(conn, &role.id, operation_ids).await
    }

    /// Fail with `DuplicateRoleName` when another live role has this name,
    /// compared case-insensitively
    pub async fn ensure_role_name_available(
        &self,
        conn: &impl ConnectionTrait,
        name: &str,
        except_role_id: Option<&str>,
    ) -> Result<(), InternalError> {
        match role_store::find_active_by_name(conn, name).await? {
            Some(existing) if Some(existing.id.as_str()) != except_role_id => {
                Err(AuthorizationError::DuplicateRoleName(name.to_string()).into())
            }
            _ => Ok(()),
        }
    }

    /// Load a role that may be assigned through the admin user endpoints
    ///
    /// # Errors
    /// `RoleNotFound` for unknown or deleted roles, `ReservedRole` for Super Admin
    pub async fn assignable_role(
        &self,
        conn: &impl ConnectionTrait,
        role_id: &str,
    ) -> Result<role::Model, InternalError> {
        let role = role_store::find_active(conn, role_id)
            .await?
            .ok_or_else(|| AuthorizationError::RoleNotFound(role_id.to_string()))?;

        if role.is_super_admin() {
            return Err(AuthorizationError::ReservedRole(role.id).into());
        }

        Ok(role)
    }
}

/// Fail with `ProtectedRole` for roles marked non-editable
pub fn ensure_editable(role: &role::Model) -> Result<(), InternalError> {
    if role.editable {
        Ok(())
    } else {
        Err(AuthorizationError::ProtectedRole(role.id.clone()).into())
    }
}

/// Attach leaves to their headings; leaves keep their incoming order and
/// headings whose id matches no leaf get an empty list
fn group_operations(
    headings: Vec<operation_model::Model>,
    leaves: Vec<OperationNode>,
) -> Vec<OperationGroup> {
    headings
        .into_iter()
        .map(OperationNode::from)
        .map(|heading| {
            let operations = leaves
                .iter()
                .filter(|leaf| {
                    matches!(leaf, OperationNode::Leaf { heading_id, .. } if heading_id == heading.id())
                })
                .cloned()
                .collect();
            OperationGroup { heading, operations }
        })
        .collect()
}
