use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::module_type;
use crate::types::dto::common::Reference;

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ModuleTypeResponse {
    pub id: String,
    pub name: String,
}

impl From<module_type::Model> for ModuleTypeResponse {
    fn from(module_type: module_type::Model) -> Self {
        Self {
            id: module_type.id,
            name: module_type.name,
        }
    }
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ModuleTypeListResponse {
    pub count: u64,
    pub list: Vec<ModuleTypeResponse>,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ModuleTypeRequest {
    #[oai(validator(min_length = 3, max_length = 50))]
    pub name: String,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ModuleResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub project: Reference,
    pub module_type: Reference,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ModuleListResponse {
    pub count: u64,
    pub list: Vec<ModuleResponse>,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ModuleRequest {
    #[oai(validator(min_length = 3, max_length = 50))]
    pub name: String,

    #[oai(validator(min_length = 3, max_length = 50))]
    pub description: String,

    #[oai(validator(min_length = 36, max_length = 36))]
    pub project_id: String,

    #[oai(validator(min_length = 36, max_length = 36))]
    pub module_type_id: String,
}
