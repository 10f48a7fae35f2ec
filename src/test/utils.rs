// Test utilities shared across unit tests
// Only compiled when running tests

use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::app_data::AppData;
use crate::cli::seed;
use crate::config::{AppSettings, MockEnvironment, SecretManager, SessionKey};
use crate::providers::{DisabledCaptcha, MemoryEmailSender};
use crate::stores::admin_user_store::{self, NewAdminUser};
use crate::stores::role_store;
use crate::types::db::{admin_user, role};

pub const TEST_PASSWORD: &str = "password123";
pub const SUPER_ADMIN_EMAIL: &str = "root@example.com";

/// Fixed session key so tokens are reproducible across a test
pub fn test_session_key() -> SessionKey {
    SessionKey::new([7u8; 32])
}

pub fn test_secret_manager() -> SecretManager {
    SecretManager::new(test_session_key(), "test-pepper")
}

/// Settings with a cheap Argon2 work factor
pub fn test_settings() -> AppSettings {
    let env = MockEnvironment::empty().with_vars(&[
        ("DATABASE_URL", "sqlite::memory:"),
        ("PASSWORD_HASH_MEMORY_KIB", "1024"),
        ("PASSWORD_HASH_ITERATIONS", "1"),
        ("PASSWORD_HASH_PARALLELISM", "1"),
    ]);
    AppSettings::from_env_provider(&env).expect("Failed to build test settings")
}

/// Single-connection in-memory database with migrations applied
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

/// AppData over a fresh database, with mail captured in memory
pub async fn setup_test_app() -> (Arc<AppData>, Arc<MemoryEmailSender>) {
    setup_test_app_with_sender(Arc::new(MemoryEmailSender::new())).await
}

pub async fn setup_test_app_with_sender(
    email_sender: Arc<MemoryEmailSender>,
) -> (Arc<AppData>, Arc<MemoryEmailSender>) {
    let db = setup_test_db().await;
    let app_data = AppData::with_collaborators(
        db,
        test_settings(),
        test_secret_manager(),
        email_sender.clone(),
        Arc::new(DisabledCaptcha),
    )
    .expect("Failed to build test AppData");

    (Arc::new(app_data), email_sender)
}

/// Seed the operation tree and a super admin; returns the super admin
pub async fn seed_super_admin(app_data: &AppData) -> admin_user::Model {
    seed::seed(
        app_data,
        Some(SUPER_ADMIN_EMAIL.to_string()),
        Some(TEST_PASSWORD.to_string()),
    )
    .await
    .expect("Failed to seed");

    admin_user_store::find_active_by_email(&app_data.db, SUPER_ADMIN_EMAIL)
        .await
        .expect("Failed to load super admin")
        .expect("Super admin missing after seed")
}

/// Editable role granted the operations with the given slugs
pub async fn create_role(app_data: &AppData, name: &str, slugs: &[&str]) -> role::Model {
    let role = role_store::insert(&app_data.db, name, name, true)
        .await
        .expect("Failed to create role");

    let mut operation_ids = Vec::new();
    for slug in slugs {
        let operation = crate::stores::operation_store::find_by_slug(&app_data.db, slug)
            .await
            .expect("Failed to load operation")
            .expect("Operation not seeded");
        operation_ids.push(operation.id);
    }
    role_store::replace_operations(&app_data.db, &role.id, &operation_ids)
        .await
        .expect("Failed to grant operations");

    role
}

/// Admin user with `TEST_PASSWORD`, optionally linked to a role
pub async fn create_admin_user(
    app_data: &AppData,
    name: &str,
    email: &str,
    role: Option<&role::Model>,
) -> admin_user::Model {
    let password_hash = app_data
        .providers
        .crypto_provider
        .hash_password(TEST_PASSWORD)
        .expect("Failed to hash password");

    let user = admin_user_store::insert(
        &app_data.db,
        NewAdminUser {
            name: name.to_string(),
            email: email.to_string(),
            password_hash,
        },
    )
    .await
    .expect("Failed to create admin user");

    if let Some(role) = role {
        admin_user_store::assign_role(&app_data.db, &user.id, &role.id)
            .await
            .expect("Failed to assign role");
    }

    user
}
