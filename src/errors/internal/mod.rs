use thiserror::Error;

pub mod authorization;
pub mod credential;
pub mod database;
pub mod delivery;
pub mod otp;
pub mod resource;
pub mod session;

pub use authorization::AuthorizationError;
pub use credential::CredentialError;
pub use database::DatabaseError;
pub use delivery::DeliveryError;
pub use otp::OtpError;
pub use resource::ResourceError;
pub use session::SessionError;

/// Internal error type for store, provider and coordinator operations
///
/// Infrastructure errors (database, parse, crypto) are shared; domain errors
/// are grouped per concern. Not exposed via API - endpoints convert to `ApiError`.
#[derive(Error, Debug)]
pub enum InternalError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("Parse error: failed to parse {value_type}: {message}")]
    Parse {
        value_type: String,
        message: String,
    },

    #[error("Crypto error: {operation} failed: {message}")]
    Crypto {
        operation: String,
        message: String,
    },

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Otp(#[from] OtpError),

    #[error(transparent)]
    Authorization(#[from] AuthorizationError),

    #[error(transparent)]
    Resource(#[from] ResourceError),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

impl InternalError {
    pub fn database(operation: &str, source: sea_orm::DbErr) -> InternalError {
        InternalError::Database(DatabaseError::Operation {
            operation: operation.to_string(),
            source,
        })
    }

    pub fn transaction_begin(source: sea_orm::DbErr) -> InternalError {
        InternalError::Database(DatabaseError::TransactionBegin { source })
    }

    pub fn transaction_commit(source: sea_orm::DbErr) -> InternalError {
        InternalError::Database(DatabaseError::TransactionCommit { source })
    }

    pub fn parse(value_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            value_type: value_type.into(),
            message: message.into(),
        }
    }

    pub fn crypto(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Crypto {
            operation: operation.into(),
            message: message.into(),
        }
    }
}
