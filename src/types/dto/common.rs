use poem_openapi::Object;
use serde::{Deserialize, Serialize};

/// Response model for health check endpoint
#[derive(Object, Debug)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,

    /// Whether the database answered a ping
    pub database: bool,
}

/// Plain confirmation message
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Id of a newly created resource
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: String,
}

/// Id and display name of a related resource
#[derive(Object, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    pub id: String,
    pub name: String,
}

/// Admin users to link to or unlink from a project or issue
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct MemberAssignment {
    #[oai(validator(min_items = 1))]
    pub admin_user_ids: Vec<String>,
}
