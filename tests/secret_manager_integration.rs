mod common;

use projectx_backend::config::{SecretError, SecretManager, SessionKey, SystemEnvironment};

const SECRET_VARS: [&str; 3] = ["JWT_KEY", "PASSWORD_PEPPER", "RE_CAPTCHA_SECRET"];

#[test]
fn test_startup_with_valid_secrets() {
    let _lock = common::ENV_TEST_MUTEX.lock().unwrap();
    let _guard = common::EnvGuard::new(SECRET_VARS.to_vec());

    let key = SessionKey::new([3u8; 32]);
    unsafe {
        std::env::set_var("JWT_KEY", key.to_jwk());
        std::env::set_var("PASSWORD_PEPPER", "valid-pepper");
    }

    let secret_manager = SecretManager::from_env_provider(&SystemEnvironment, false)
        .expect("SecretManager should load from the environment");

    assert_eq!(secret_manager.session_key(), &key);
    assert_eq!(secret_manager.password_pepper(), "valid-pepper");
    assert!(secret_manager.recaptcha_secret().is_none());
}

#[test]
fn test_startup_fails_without_session_key() {
    let _lock = common::ENV_TEST_MUTEX.lock().unwrap();
    let _guard = common::EnvGuard::new(SECRET_VARS.to_vec());

    let result = SecretManager::from_env_provider(&SystemEnvironment, false);

    assert!(matches!(result, Err(SecretError::Missing { .. })));
}

#[test]
fn test_captcha_requires_secret() {
    let _lock = common::ENV_TEST_MUTEX.lock().unwrap();
    let _guard = common::EnvGuard::new(SECRET_VARS.to_vec());

    unsafe {
        std::env::set_var("JWT_KEY", SessionKey::new([3u8; 32]).to_jwk());
    }

    assert!(SecretManager::from_env_provider(&SystemEnvironment, true).is_err());

    unsafe {
        std::env::set_var("RE_CAPTCHA_SECRET", "recaptcha-secret");
    }
    let secret_manager = SecretManager::from_env_provider(&SystemEnvironment, true).unwrap();
    assert_eq!(secret_manager.recaptcha_secret(), Some("recaptcha-secret"));
}

#[test]
fn test_secrets_are_redacted_in_debug_output() {
    let secret_manager = SecretManager::new(SessionKey::new([5u8; 32]), "hidden-pepper");

    let debug = format!("{:?}", secret_manager);

    assert!(!debug.contains("hidden-pepper"));
    assert!(debug.contains("<redacted>"));
}
