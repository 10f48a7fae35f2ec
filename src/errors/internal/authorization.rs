use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthorizationError {
    #[error("Permission denied for operation '{operation}'")]
    PermissionDenied { operation: String },

    #[error("Role not found: {0}")]
    RoleNotFound(String),

    #[error("Role already exists: {0}")]
    DuplicateRoleName(String),

    /// Role is marked non-editable
    #[error("Role is protected: {0}")]
    ProtectedRole(String),

    /// The super admin role can only be granted by seeding
    #[error("Role is reserved: {0}")]
    ReservedRole(String),

    /// Super admin accounts cannot be deleted through the API
    #[error("Admin user is protected: {0}")]
    ProtectedAdminUser(String),

    #[error("Operation not found: {0}")]
    OperationNotFound(String),
}
