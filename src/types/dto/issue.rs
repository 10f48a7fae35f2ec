use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::issue::{IssuePriority, IssueStatus};
use crate::types::dto::common::Reference;

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct IssueResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub status: IssueStatus,
    pub priority: IssuePriority,
    pub task: Reference,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct IssueListResponse {
    pub count: u64,
    pub list: Vec<IssueResponse>,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct IssueRequest {
    #[oai(validator(min_length = 3, max_length = 50))]
    pub name: String,

    #[oai(validator(min_length = 3, max_length = 50))]
    pub description: Option<String>,

    /// Defaults to MEDIUM
    pub priority: Option<IssuePriority>,

    #[oai(validator(min_length = 36, max_length = 36))]
    pub task_id: String,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct IssueMembersResponse {
    pub issue_id: String,
    pub admin_users: Vec<Reference>,
}
