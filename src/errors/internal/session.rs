use thiserror::Error;

/// Failures while resolving a session token to an admin user
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Missing token")]
    MissingToken,

    #[error("Invalid token: {reason}")]
    InvalidToken { reason: String },

    /// Token decoded but the admin user is gone or soft deleted
    #[error("Admin user for token not found: {admin_user_id}")]
    UnknownAdminUser { admin_user_id: String },
}

impl SessionError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidToken {
            reason: reason.into(),
        }
    }
}
