use thiserror::Error;

/// Startup configuration failures; any of these stops the process
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Required setting '{setting_name}' is missing")]
    MissingRequiredSetting { setting_name: String },

    #[error("Setting '{setting_name}' has invalid format. Expected: {expected}, got: {actual}")]
    InvalidFormat {
        setting_name: String,
        expected: String,
        actual: String,
    },

    #[error("Invalid setting '{setting_name}': {reason}")]
    InvalidSetting { setting_name: String, reason: String },
}

impl ConfigError {
    pub fn missing(setting_name: &str) -> Self {
        Self::MissingRequiredSetting {
            setting_name: setting_name.to_string(),
        }
    }

    pub fn invalid(setting_name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidSetting {
            setting_name: setting_name.to_string(),
            reason: reason.into(),
        }
    }
}
