use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::{operation, role};

#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct RoleResponse {
    pub id: String,
    pub name: String,
    pub editable: bool,
}

impl From<role::Model> for RoleResponse {
    fn from(role: role::Model) -> Self {
        Self {
            id: role.id,
            name: role.name,
            editable: role.editable,
        }
    }
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct RoleListResponse {
    pub count: u64,
    pub list: Vec<RoleResponse>,
}

/// Granted operation, named by its slug
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct GrantedOperation {
    pub id: String,
    pub name: String,
}

impl From<operation::Model> for GrantedOperation {
    fn from(operation: operation::Model) -> Self {
        Self {
            id: operation.id,
            name: operation.slug,
        }
    }
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct RoleDetailsResponse {
    pub id: String,
    pub name: String,
    pub operations: Vec<GrantedOperation>,
}

/// Create or update a role with the full set of granted operation ids
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct RoleRequest {
    #[oai(validator(min_length = 2, max_length = 50))]
    pub name: String,

    /// Operation ids
    pub operations: Vec<String>,
}
