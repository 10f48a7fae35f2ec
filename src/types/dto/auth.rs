use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::dto::role::RoleResponse;

/// Request model for admin login
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    #[oai(validator(min_length = 3, max_length = 100))]
    pub email: String,

    #[oai(validator(min_length = 6, max_length = 50))]
    pub password: String,
}

/// Profile of the authenticated admin user plus the session token
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Option<RoleResponse>,

    /// Opaque value for the `token` header of later requests
    pub token: String,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ForgotPasswordRequest {
    #[oai(validator(min_length = 3, max_length = 100))]
    pub email: String,

    /// Only checked when CAPTCHA is enabled
    #[oai(validator(max_length = 10000))]
    pub captcha_token: Option<String>,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct VerifyOtpRequest {
    #[oai(validator(min_length = 3, max_length = 100))]
    pub email: String,

    #[oai(validator(min_length = 6, max_length = 6))]
    pub otp: String,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ConfirmForgotPasswordRequest {
    #[oai(validator(min_length = 3, max_length = 100))]
    pub email: String,

    #[oai(validator(min_length = 6, max_length = 50))]
    pub password: String,

    #[oai(validator(min_length = 6, max_length = 50))]
    pub confirm_password: String,
}
