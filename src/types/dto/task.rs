use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::task::TaskStatus;
use crate::types::dto::common::Reference;

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct TaskResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub module: Reference,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct TaskListResponse {
    pub count: u64,
    pub list: Vec<TaskResponse>,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct TaskRequest {
    #[oai(validator(min_length = 3, max_length = 50))]
    pub name: String,

    #[oai(validator(min_length = 3, max_length = 50))]
    pub description: Option<String>,

    #[oai(validator(min_length = 36, max_length = 36))]
    pub module_id: String,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct TaskStatusRequest {
    pub status: TaskStatus,
}
