// Common test utilities for integration tests

use std::sync::{Arc, Mutex};

use migration::{Migrator, MigratorTrait};
use poem::Endpoint;
use poem::test::TestClient;
use projectx_backend::AppData;
use projectx_backend::api::build_app;
use projectx_backend::cli::seed;
use projectx_backend::config::{AppSettings, MockEnvironment, SecretManager, SessionKey};
use projectx_backend::providers::{DisabledCaptcha, MemoryEmailSender};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde_json::json;

pub const SUPER_ADMIN_EMAIL: &str = "root@example.com";
pub const TEST_PASSWORD: &str = "password123";

/// Creates a single-connection in-memory database with migrations applied
pub async fn setup_test_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:".to_owned());
    options.max_connections(1).sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Seeded application plus the captured mailbox
pub async fn setup_test_app() -> (Arc<AppData>, Arc<MemoryEmailSender>) {
    let env = MockEnvironment::empty().with_vars(&[
        ("DATABASE_URL", "sqlite::memory:"),
        ("PASSWORD_HASH_MEMORY_KIB", "1024"),
        ("PASSWORD_HASH_ITERATIONS", "1"),
        ("PASSWORD_HASH_PARALLELISM", "1"),
    ]);
    let settings = AppSettings::from_env_provider(&env).expect("Failed to build settings");
    let secret_manager = SecretManager::new(SessionKey::new([9u8; 32]), "integration-pepper");
    let sender = Arc::new(MemoryEmailSender::new());

    let app_data = AppData::with_collaborators(
        setup_test_db().await,
        settings,
        secret_manager,
        sender.clone(),
        Arc::new(DisabledCaptcha),
    )
    .expect("Failed to build AppData");

    seed::seed(
        &app_data,
        Some(SUPER_ADMIN_EMAIL.to_string()),
        Some(TEST_PASSWORD.to_string()),
    )
    .await
    .expect("Failed to seed");

    (Arc::new(app_data), sender)
}

/// HTTP client over the fully composed application
pub fn client(app_data: Arc<AppData>) -> TestClient<impl Endpoint> {
    // The endpoint must not borrow the server URL, same as the binary's `serve`
    let server_url = String::from("http://localhost/api");
    TestClient::new(build_app(app_data, &server_url))
}

/// Log in through the API and return the session token
pub async fn login<E: Endpoint>(cli: &TestClient<E>, email: &str, password: &str) -> String {
    let resp = cli
        .post("/api/login")
        .body_json(&json!({ "email": email, "password": password }))
        .send()
        .await;
    resp.assert_status_is_ok();

    resp.json()
        .await
        .value()
        .object()
        .get("token")
        .string()
        .to_string()
}

/// Helper to manage environment variables in tests
///
/// Cleans up specified environment variables on creation and drop,
/// ensuring test isolation when dealing with global environment state.
pub struct EnvGuard {
    vars: Vec<String>,
}

impl EnvGuard {
    pub fn new(vars: Vec<&str>) -> Self {
        for var in &vars {
            unsafe {
                std::env::remove_var(var);
            }
        }
        Self {
            vars: vars.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for var in &self.vars {
            unsafe {
                std::env::remove_var(var);
            }
        }
    }
}

/// Global mutex for tests that modify environment variables
///
/// Environment variables are process-global, so tests that modify them
/// must run serially to avoid race conditions.
pub static ENV_TEST_MUTEX: Mutex<()> = Mutex::new(());
