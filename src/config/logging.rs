use std::path::{Path, PathBuf};

use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::EnvironmentProvider;

/// Configuration for application logging
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub log_level: String,
    pub app_log_file: Option<PathBuf>,
    pub app_log_retention_days: u32,
}

impl LoggingConfig {
    /// Load logging configuration from the environment provider
    pub fn from_env_provider(env: &dyn EnvironmentProvider) -> Self {
        let log_level = env.get_or("LOG_LEVEL", "INFO");

        let app_log_file = env
            .get_var("APP_LOG_FILE")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        let app_log_retention_days = env
            .get_var("APP_LOG_RETENTION_DAYS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(7);

        Self {
            log_level,
            app_log_file,
            app_log_retention_days,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to initialize logging: {0}")]
    InitializationError(String),

    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),

    #[error("File system error: {0}")]
    FileSystemError(#[from] std::io::Error),
}

/// Initialize the tracing subscriber with console and optional file output
pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    let env_filter = level_filter(&config.log_level)?;

    let console_layer = fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_filter(env_filter);

    let subscriber = tracing_subscriber::registry().with(console_layer);

    if let Some(log_file_path) = &config.app_log_file {
        let directory = log_file_path.parent().unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(directory)?;

        let file_name = log_file_path
            .file_name()
            .ok_or_else(|| LoggingError::InitializationError("Invalid log file path".to_string()))?;

        let file_appender = tracing_appender::rolling::Builder::new()
            .rotation(tracing_appender::rolling::Rotation::DAILY)
            .filename_prefix(file_name.to_string_lossy().into_owned())
            .max_log_files(config.app_log_retention_days.max(1) as usize)
            .build(directory)
            .map_err(|e| LoggingError::InitializationError(e.to_string()))?;

        let file_layer = fmt::layer()
            .with_writer(file_appender)
            .with_target(true)
            .with_ansi(false)
            .with_file(true)
            .with_line_number(true)
            .with_filter(level_filter(&config.log_level)?);

        subscriber
            .with(file_layer)
            .try_init()
            .map_err(|e| LoggingError::InitializationError(e.to_string()))?;
    } else {
        subscriber
            .try_init()
            .map_err(|e| LoggingError::InitializationError(e.to_string()))?;
    }

    Ok(())
}

fn level_filter(log_level: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(log_level)
        .map_err(|e| LoggingError::InvalidLogLevel(format!("{}: {}", log_level, e)))
}
