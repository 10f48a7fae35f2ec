mod app_settings;
mod database;
mod env_provider;
mod errors;
mod logging;
mod secret_manager;

pub use app_settings::{AppSettings, HashingSettings, MIN_POOL_SIZE, pool_size_per_worker};
pub use database::{begin_transaction, commit_transaction, connect_database, migrate_database};
pub use env_provider::{EnvironmentProvider, MockEnvironment, SystemEnvironment};
pub use errors::ConfigError;
pub use logging::{LoggingConfig, LoggingError, init_logging};
pub use secret_manager::{SESSION_KEY_LEN, SecretError, SecretManager, SessionKey};
