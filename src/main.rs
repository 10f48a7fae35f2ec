use std::sync::Arc;

use clap::Parser;
use poem::{Server, listener::TcpListener};

use projectx_backend::api::build_app;
use projectx_backend::app_data::AppData;
use projectx_backend::cli::{Cli, Commands, migrate, seed};
use projectx_backend::config::{
    AppSettings, LoggingConfig, SecretManager, SystemEnvironment, connect_database, init_logging,
    migrate_database,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let env = SystemEnvironment;

    init_logging(&LoggingConfig::from_env_provider(&env))?;

    // Invalid configuration is fatal
    let settings = AppSettings::from_env_provider(&env).inspect_err(|e| {
        tracing::error!("Invalid configuration: {}", e);
    })?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Migrate => migrate::run_migrations(&settings).await,
        Commands::Seed { email, password } => {
            let app_data = load_app_data(settings, &env).await?;
            seed::seed(&app_data, email, password).await?;
            Ok(())
        }
        Commands::Serve => serve(settings, &env).await,
    }
}

async fn load_app_data(
    settings: AppSettings,
    env: &SystemEnvironment,
) -> Result<AppData, Box<dyn std::error::Error>> {
    let secret_manager = SecretManager::from_env_provider(env, settings.captcha_enabled())
        .inspect_err(|e| tracing::error!("Invalid secrets: {}", e))?;

    let db = connect_database(&settings).await?;
    migrate_database(&db).await?;

    Ok(AppData::init(db, settings, secret_manager)?)
}

async fn serve(settings: AppSettings, env: &SystemEnvironment) -> Result<(), Box<dyn std::error::Error>> {
    let address = settings.server_address();
    let app_data = Arc::new(load_app_data(settings, env).await?);

    let server_url = format!("http://{}/api", address);
    let app = build_app(app_data, &server_url);

    tracing::info!("Starting server on http://{}", address);
    tracing::info!("Swagger UI available at http://{}/swagger", address);

    Server::new(TcpListener::bind(address)).run(app).await?;
    Ok(())
}
