use thiserror::Error;

/// Errors raised by project, module, task and issue management
#[derive(Error, Debug)]
pub enum ResourceError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("{entity} already exists: {name}")]
    Duplicate { entity: &'static str, name: String },

    #[error("Invalid state: {message}")]
    InvalidState { message: String },
}

impl ResourceError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn duplicate(entity: &'static str, name: impl Into<String>) -> Self {
        Self::Duplicate {
            entity,
            name: name.into(),
        }
    }
}
