use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::admin_user;
use crate::types::dto::role::RoleResponse;

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct AdminUserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Option<RoleResponse>,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct AdminUserListResponse {
    pub count: u64,
    pub list: Vec<AdminUserResponse>,
}

/// The caller's own profile
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<admin_user::Model> for ProfileResponse {
    fn from(user: admin_user::Model) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ProfileUpdateRequest {
    #[oai(validator(min_length = 3, max_length = 100))]
    pub name: String,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    #[oai(validator(min_length = 6, max_length = 50))]
    pub old_password: String,

    #[oai(validator(min_length = 6, max_length = 50))]
    pub new_password: String,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ResetPasswordRequest {
    #[oai(validator(min_length = 6, max_length = 50))]
    pub new_password: String,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct AdminUserAddRequest {
    #[oai(validator(min_length = 3, max_length = 100))]
    pub name: String,

    #[oai(validator(min_length = 5, max_length = 100))]
    pub email: String,

    #[oai(validator(min_length = 6, max_length = 50))]
    pub password: String,

    #[oai(validator(min_length = 36, max_length = 36))]
    pub role_id: String,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct AdminUserUpdateRequest {
    #[oai(validator(min_length = 3, max_length = 100))]
    pub name: String,

    #[oai(validator(min_length = 5, max_length = 100))]
    pub email: String,

    #[oai(validator(min_length = 36, max_length = 36))]
    pub role_id: String,
}

/// Id and name, for pickers
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct AdminUserSummary {
    pub id: String,
    pub name: String,
}
