use std::collections::HashMap;
use std::str::FromStr;

use crate::config::errors::ConfigError;

/// Trait for providing environment variable access
///
/// Lets settings be loaded from an injected source so tests never touch the
/// process environment.
pub trait EnvironmentProvider {
    fn get_var(&self, key: &str) -> Option<String>;

    /// Value of `key`, or `default` when unset or blank
    fn get_or(&self, key: &str, default: &str) -> String {
        self.get_var(key)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| default.to_string())
    }

    /// Accepts true/false, 1/0, yes/no (case-insensitive)
    fn get_bool(&self, key: &str, default: bool) -> Result<bool, ConfigError> {
        match self.get_var(key) {
            None => Ok(default),
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "" => Ok(default),
                "true" | "1" | "yes" => Ok(true),
                "false" | "0" | "no" => Ok(false),
                _ => Err(ConfigError::InvalidFormat {
                    setting_name: key.to_string(),
                    expected: "boolean".to_string(),
                    actual: raw,
                }),
            },
        }
    }
}

/// Parse `key` into `T`, falling back to `default` when unset
pub fn get_parsed<T: FromStr>(
    env: &dyn EnvironmentProvider,
    key: &str,
    default: T,
) -> Result<T, ConfigError> {
    match env.get_var(key).filter(|value| !value.trim().is_empty()) {
        None => Ok(default),
        Some(raw) => raw.trim().parse::<T>().map_err(|_| ConfigError::InvalidFormat {
            setting_name: key.to_string(),
            expected: std::any::type_name::<T>().to_string(),
            actual: raw,
        }),
    }
}

/// Production environment provider that reads from system environment
pub struct SystemEnvironment;

impl EnvironmentProvider for SystemEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// In-memory environment provider
///
/// Used by tests and by embedders that build configuration programmatically.
#[derive(Debug, Clone, Default)]
pub struct MockEnvironment {
    vars: HashMap<String, String>,
}

impl MockEnvironment {
    pub fn new(vars: HashMap<String, String>) -> Self {
        Self { vars }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_vars(mut self, vars: &[(&str, &str)]) -> Self {
        for (key, value) in vars {
            self.vars.insert(key.to_string(), value.to_string());
        }
        self
    }
}

impl EnvironmentProvider for MockEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_or_falls_back_on_blank_values() {
        let env = MockEnvironment::empty().with_var("HOST", "  ");

        assert_eq!(env.get_or("HOST", "0.0.0.0"), "0.0.0.0");
        assert_eq!(env.get_or("PORT", "3000"), "3000");
    }

    #[test]
    fn test_get_parsed_reports_setting_name() {
        let env = MockEnvironment::empty().with_var("DB_POOL_SIZE", "lots");

        let err = get_parsed::<u32>(&env, "DB_POOL_SIZE", 100).unwrap_err();
        assert!(err.to_string().contains("DB_POOL_SIZE"));
        assert_eq!(
            get_parsed::<u32>(&MockEnvironment::empty(), "DB_POOL_SIZE", 100).unwrap(),
            100
        );
    }

    #[test]
    fn test_get_bool_variants() {
        let env = MockEnvironment::empty()
            .with_vars(&[("A", "TRUE"), ("B", "0"), ("C", "maybe")]);

        assert!(env.get_bool("A", false).unwrap());
        assert!(!env.get_bool("B", true).unwrap());
        assert!(env.get_bool("C", false).is_err());
        assert!(env.get_bool("MISSING", true).unwrap());
    }

    #[test]
    fn test_system_environment_provider() {
        let provider = SystemEnvironment;

        unsafe {
            std::env::set_var("PROJECTX_TEST_VAR_12345", "test_value");
        }

        assert_eq!(
            provider.get_var("PROJECTX_TEST_VAR_12345"),
            Some("test_value".to_string())
        );
        assert_eq!(provider.get_var("PROJECTX_NON_EXISTENT_VAR_98765"), None);

        unsafe {
            std::env::remove_var("PROJECTX_TEST_VAR_12345");
        }
    }
}
