use std::sync::Arc;

use poem_openapi::{OpenApi, Tags, payload::Json};

use crate::app_data::AppData;
use crate::coordinators::AuthCoordinator;
use crate::errors::ApiError;
use crate::types::dto::auth::{
    ConfirmForgotPasswordRequest, ForgotPasswordRequest, LoginRequest, LoginResponse,
    VerifyOtpRequest,
};
use crate::types::dto::common::MessageResponse;

/// Login and password reset endpoints; none of them need a session token
pub struct AuthApi {
    auth_coordinator: AuthCoordinator,
}

impl AuthApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            auth_coordinator: AuthCoordinator::new(app_data),
        }
    }
}

#[derive(Tags)]
enum AuthTags {
    /// Login and password reset
    Authentication,
}

#[OpenApi]
impl AuthApi {
    /// Exchange email and password for a session token
    #[oai(path = "/login", method = "post", tag = "AuthTags::Authentication")]
    async fn login(&self, body: Json<LoginRequest>) -> Result<Json<LoginResponse>, ApiError> {
        Ok(Json(self.auth_coordinator.login(body.0).await?))
    }

    /// Email a one-time code for resetting the password
    #[oai(path = "/forgot-password", method = "post", tag = "AuthTags::Authentication")]
    async fn forgot_password(
        &self,
        body: Json<ForgotPasswordRequest>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        self.auth_coordinator.forgot_password(body.0).await?;
        Ok(Json(MessageResponse::new("Email sent")))
    }

    #[oai(path = "/verify-otp", method = "post", tag = "AuthTags::Authentication")]
    async fn verify_otp(&self, body: Json<VerifyOtpRequest>) -> Result<Json<MessageResponse>, ApiError> {
        self.auth_coordinator.verify_otp(body.0).await?;
        Ok(Json(MessageResponse::new("Otp verified")))
    }

    /// Set a new password after the one-time code was verified
    #[oai(path = "/forgot-password", method = "put", tag = "AuthTags::Authentication")]
    async fn confirm_forgot_password(
        &self,
        body: Json<ConfirmForgotPasswordRequest>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        self.auth_coordinator.confirm_forgot_password(body.0).await?;
        Ok(Json(MessageResponse::new("Password changed")))
    }
}
