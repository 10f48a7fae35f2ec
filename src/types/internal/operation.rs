use crate::types::db::operation;

/// Two-level permission tree node
///
/// Headings only group operations for navigation; leaves are the grantable
/// permission units checked by slug.
#[derive(Debug, Clone, PartialEq)]
pub enum OperationNode {
    Heading {
        id: String,
        slug: String,
        name: String,
        order: i32,
    },
    Leaf {
        id: String,
        slug: String,
        name: String,
        order: i32,
        heading_id: String,
    },
}

impl OperationNode {
    pub fn id(&self) -> &str {
        match self {
            OperationNode::Heading { id, .. } | OperationNode::Leaf { id, .. } => id,
        }
    }

    pub fn slug(&self) -> &str {
        match self {
            OperationNode::Heading { slug, .. } | OperationNode::Leaf { slug, .. } => slug,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            OperationNode::Heading { name, .. } | OperationNode::Leaf { name, .. } => name,
        }
    }

    pub fn is_heading(&self) -> bool {
        matches!(self, OperationNode::Heading { .. })
    }
}

impl From<operation::Model> for OperationNode {
    fn from(model: operation::Model) -> Self {
        match model.parent_id {
            None => OperationNode::Heading {
                id: model.id,
                slug: model.slug,
                name: model.name,
                order: model.order_index,
            },
            Some(heading_id) => OperationNode::Leaf {
                id: model.id,
                slug: model.slug,
                name: model.name,
                order: model.order_index,
                heading_id,
            },
        }
    }
}

/// A heading with its leaf operations, both in `order_index` order
#[derive(Debug, Clone, PartialEq)]
pub struct OperationGroup {
    pub heading: OperationNode,
    pub operations: Vec<OperationNode>,
}

/// Operations granted to one admin user, shaped for navigation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PermissionSet {
    /// Granted leaf operation slugs
    pub operations: Vec<String>,

    /// Slugs of headings with at least one granted leaf
    pub menu: Vec<String>,
}

/// Operation slugs checked by the admin endpoints
pub mod permission {
    pub const LIST_ROLES: &str = "List Roles";
    pub const ADD_ROLE: &str = "Add Role";
    pub const EDIT_ROLE: &str = "Edit Role";
    pub const DELETE_ROLE: &str = "Delete Role";
    pub const LIST_ADMIN_USERS: &str = "List Admin Users";
    pub const ADD_ADMIN_USER: &str = "Add Admin User";
    pub const EDIT_ADMIN_USER: &str = "Edit Admin User";
    pub const DELETE_ADMIN_USER: &str = "Delete Admin User";
    pub const RESET_PASSWORD: &str = "Reset Password";
}
