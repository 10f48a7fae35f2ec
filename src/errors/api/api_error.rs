use crate::errors::internal::{
    AuthorizationError, CredentialError, DeliveryError, InternalError, OtpError, ResourceError,
    SessionError,
};
use poem_openapi::{ApiResponse, Object, payload::Json};
use serde::Serialize;
use std::fmt;

/// Standardized error response body
#[derive(Object, Serialize, Debug, Clone)]
pub struct ApiErrorResponse {
    /// Error code identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,
}

/// Errors returned by every API endpoint
#[derive(ApiResponse, Debug)]
pub enum ApiError {
    /// Token missing, undecodable, or bound to an unknown admin user
    #[oai(status = 401)]
    Unauthenticated(Json<ApiErrorResponse>),

    /// Authenticated admin user lacks the required operation
    #[oai(status = 401)]
    Unauthorized(Json<ApiErrorResponse>),

    /// Request is well formed but cannot be processed as given
    #[oai(status = 400)]
    BadRequest(Json<ApiErrorResponse>),

    /// Mutation of a protected resource or a rejected OTP
    #[oai(status = 403)]
    Forbidden(Json<ApiErrorResponse>),

    /// Entity absent or soft deleted
    #[oai(status = 404)]
    NotFound(Json<ApiErrorResponse>),

    /// Name or email uniqueness violation
    #[oai(status = 409)]
    Conflict(Json<ApiErrorResponse>),

    /// Malformed input
    #[oai(status = 422)]
    ValidationError(Json<ApiErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ApiErrorResponse>),
}

fn body(error: &str, message: impl Into<String>, status_code: u16) -> Json<ApiErrorResponse> {
    Json(ApiErrorResponse {
        error: error.to_string(),
        message: message.into(),
        status_code,
    })
}

impl ApiError {
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        ApiError::Unauthenticated(body("unauthenticated", message, 401))
    }

    pub fn unauthorized() -> Self {
        ApiError::Unauthorized(body("unauthorized", "You don't have permission.", 401))
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(body("bad_request", message, 400))
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(body("forbidden", message, 403))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(body("not_found", message, 404))
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(body("conflict", message, 409))
    }

    /// Field level validation failure, rendered as `"<field> - <Message>"`
    pub fn validation(field: &str, message: &str) -> Self {
        ApiError::ValidationError(body(
            "validation_error",
            format!("{} - {}", field, capitalize(message)),
            422,
        ))
    }

    /// Generic internal error; never carries internal detail
    pub fn internal_server_error() -> Self {
        ApiError::InternalError(body("internal_error", "An internal error occurred", 500))
    }

    /// Convert InternalError to ApiError
    ///
    /// This is the explicit conversion point from internal errors to API errors.
    /// Internal error details are logged but not exposed to clients.
    pub fn from_internal_error(err: InternalError) -> Self {
        match &err {
            // Infrastructure errors - always log and return generic error
            InternalError::Database(_) => {
                tracing::error!("Database failure: {}", err);
                Self::internal_server_error()
            }
            InternalError::Parse { value_type, .. } => {
                tracing::error!("Parse error for {}: {}", value_type, err);
                Self::internal_server_error()
            }
            InternalError::Crypto { operation, .. } => {
                tracing::error!("Crypto error in {}: {}", operation, err);
                Self::internal_server_error()
            }

            InternalError::Session(session) => {
                tracing::debug!("Session rejected: {}", session);
                match session {
                    SessionError::MissingToken => Self::unauthenticated("Missing token"),
                    SessionError::InvalidToken { .. } => Self::unauthenticated("Invalid token"),
                    SessionError::UnknownAdminUser { .. } => {
                        Self::unauthenticated("ADMIN_USER_NOT_FOUND")
                    }
                }
            }

            InternalError::Credential(credential) => match credential {
                CredentialError::InvalidCredentials => {
                    tracing::debug!("Invalid login attempt");
                    Self::unauthenticated("Invalid credentials")
                }
                CredentialError::IncorrectPassword => {
                    tracing::debug!("Incorrect old password on password change");
                    Self::unauthenticated("Incorrect old password")
                }
                CredentialError::PasswordMismatch => {
                    Self::bad_request("Password and confirm password do not match")
                }
                CredentialError::EmailNotRegistered(_) => {
                    tracing::debug!("{}", credential);
                    Self::not_found("Email not registered")
                }
                CredentialError::DuplicateEmail(_) => {
                    tracing::warn!("{}", credential);
                    Self::conflict("User already exist.")
                }
                CredentialError::EmailTaken(_) => {
                    tracing::warn!("{}", credential);
                    Self::conflict("Email already exists.")
                }
                CredentialError::AdminUserNotFound(_) => {
                    tracing::debug!("{}", credential);
                    Self::not_found("Admin user not found.")
                }
                CredentialError::PasswordHashingFailed(_) => {
                    tracing::error!("{}", credential);
                    Self::internal_server_error()
                }
            },

            InternalError::Otp(otp) => match otp {
                OtpError::AlreadyRedeemed => {
                    tracing::debug!("OTP rejected: {}", otp);
                    Self::forbidden("OTP already redeemed.")
                }
                OtpError::Mismatch => {
                    tracing::debug!("OTP rejected: {}", otp);
                    Self::forbidden("Invalid OTP.")
                }
                OtpError::Expired => {
                    tracing::debug!("OTP rejected: {}", otp);
                    Self::forbidden("OTP expired.")
                }
                OtpError::NoChallenge { .. } => {
                    tracing::error!("{}", otp);
                    Self::internal_server_error()
                }
            },

            InternalError::Authorization(authorization) => match authorization {
                AuthorizationError::PermissionDenied { operation } => {
                    tracing::debug!("Permission denied for operation '{}'", operation);
                    Self::unauthorized()
                }
                AuthorizationError::RoleNotFound(_) => Self::not_found("Role not found."),
                AuthorizationError::DuplicateRoleName(name) => {
                    tracing::warn!("Duplicate role name: {}", name);
                    Self::conflict("Role already exist.")
                }
                AuthorizationError::ProtectedRole(_) => {
                    tracing::warn!("{}", authorization);
                    Self::forbidden("Role is not editable.")
                }
                AuthorizationError::ReservedRole(_) => {
                    tracing::warn!("{}", authorization);
                    Self::forbidden("Super Admin role cannot be assigned.")
                }
                AuthorizationError::ProtectedAdminUser(_) => {
                    tracing::warn!("{}", authorization);
                    Self::forbidden("Super Admin cannot be deleted.")
                }
                AuthorizationError::OperationNotFound(_) => {
                    Self::not_found("Operation not found")
                }
            },

            InternalError::Resource(resource) => match resource {
                ResourceError::NotFound { entity, .. } => {
                    tracing::debug!("{}", resource);
                    Self::not_found(format!("{} not found.", entity))
                }
                ResourceError::Duplicate { entity, .. } => {
                    tracing::warn!("{}", resource);
                    Self::conflict(format!("{} already exists.", entity))
                }
                ResourceError::InvalidState { message } => Self::bad_request(message.clone()),
            },

            InternalError::Delivery(delivery) => match delivery {
                DeliveryError::EmailFailed { .. } => {
                    tracing::error!("{}", delivery);
                    ApiError::InternalError(body(
                        "internal_error",
                        "Error while sending email.",
                        500,
                    ))
                }
                DeliveryError::CaptchaRejected => {
                    tracing::debug!("{}", delivery);
                    Self::bad_request("Captcha verification failed.")
                }
                DeliveryError::CaptchaUnavailable(_) => {
                    tracing::error!("{}", delivery);
                    Self::internal_server_error()
                }
            },
        }
    }

    fn response(&self) -> &ApiErrorResponse {
        match self {
            ApiError::Unauthenticated(json)
            | ApiError::Unauthorized(json)
            | ApiError::BadRequest(json)
            | ApiError::Forbidden(json)
            | ApiError::NotFound(json)
            | ApiError::Conflict(json)
            | ApiError::ValidationError(json)
            | ApiError::InternalError(json) => &json.0,
        }
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        self.response().message.clone()
    }

    pub fn status_code(&self) -> u16 {
        self.response().status_code
    }
}

impl From<InternalError> for ApiError {
    fn from(err: InternalError) -> Self {
        ApiError::from_internal_error(err)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

fn capitalize(message: &str) -> String {
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
