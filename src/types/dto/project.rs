use chrono::NaiveDate;
use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::project::ProjectStatus;
use crate::types::dto::common::Reference;

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ProjectResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: ProjectStatus,
    pub manager: Reference,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ProjectListResponse {
    pub count: u64,
    pub list: Vec<ProjectResponse>,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ProjectRequest {
    #[oai(validator(min_length = 3, max_length = 50))]
    pub name: String,

    #[oai(validator(min_length = 3, max_length = 50))]
    pub description: Option<String>,

    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    #[oai(validator(min_length = 36, max_length = 36))]
    pub manager_id: String,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ProjectStatusRequest {
    pub status: ProjectStatus,
}

/// Project with the admin users linked to it
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ProjectMembersResponse {
    pub project_id: String,
    pub admin_users: Vec<Reference>,
}
