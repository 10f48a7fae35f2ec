use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::internal::operation::{OperationGroup, OperationNode, PermissionSet};

/// Operations the caller may perform and the menu headings to show
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct PermissionsResponse {
    pub operations: Vec<String>,
    pub menu: Vec<String>,
}

impl From<PermissionSet> for PermissionsResponse {
    fn from(permissions: PermissionSet) -> Self {
        Self {
            operations: permissions.operations,
            menu: permissions.menu,
        }
    }
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct OperationResponse {
    pub id: String,
    pub name: String,
}

impl From<OperationNode> for OperationResponse {
    fn from(node: OperationNode) -> Self {
        Self {
            id: node.id().to_string(),
            name: node.name().to_string(),
        }
    }
}

/// A heading with its operations
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct OperationGroupResponse {
    pub id: String,
    pub name: String,
    pub operations: Vec<OperationResponse>,
}

impl From<OperationGroup> for OperationGroupResponse {
    fn from(group: OperationGroup) -> Self {
        Self {
            id: group.heading.id().to_string(),
            name: group.heading.name().to_string(),
            operations: group.operations.into_iter().map(Into::into).collect(),
        }
    }
}
