use std::fmt;

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::Deserialize;
use thiserror::Error;

use crate::config::EnvironmentProvider;

/// Length in bytes of the symmetric session key (A256KW / HS256)
pub const SESSION_KEY_LEN: usize = 32;

/// Custom error type for secret-related failures
#[derive(Error, Debug)]
pub enum SecretError {
    #[error("Required secret '{secret_name}' is missing")]
    Missing { secret_name: String },

    #[error("Secret '{secret_name}' is malformed: {reason}")]
    Malformed { secret_name: String, reason: String },

    #[error("Secret '{secret_name}' must decode to {expected} bytes, got {actual}")]
    InvalidLength {
        secret_name: String,
        expected: usize,
        actual: usize,
    },
}

impl SecretError {
    pub fn missing(secret_name: &str) -> Self {
        Self::Missing {
            secret_name: secret_name.to_string(),
        }
    }

    pub fn malformed(secret_name: &str, reason: impl Into<String>) -> Self {
        Self::Malformed {
            secret_name: secret_name.to_string(),
            reason: reason.into(),
        }
    }
}

#[derive(Deserialize)]
struct OctetJwk {
    kty: String,
    k: String,
}

/// Symmetric key used to sign and encrypt session tokens
#[derive(Clone, PartialEq, Eq)]
pub struct SessionKey([u8; SESSION_KEY_LEN]);

impl SessionKey {
    pub fn new(bytes: [u8; SESSION_KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Parse a JSON Web Key of type `oct` whose `k` holds exactly 32 bytes
    pub fn from_jwk(json: &str) -> Result<Self, SecretError> {
        let jwk: OctetJwk = serde_json::from_str(json)
            .map_err(|e| SecretError::malformed("JWT_KEY", format!("not a JWK: {}", e)))?;

        if jwk.kty != "oct" {
            return Err(SecretError::malformed(
                "JWT_KEY",
                format!("expected kty \"oct\", got \"{}\"", jwk.kty),
            ));
        }

        let bytes = URL_SAFE_NO_PAD
            .decode(jwk.k.trim_end_matches('='))
            .map_err(|e| SecretError::malformed("JWT_KEY", format!("k is not base64url: {}", e)))?;

        let key: [u8; SESSION_KEY_LEN] =
            bytes
                .as_slice()
                .try_into()
                .map_err(|_| SecretError::InvalidLength {
                    secret_name: "JWT_KEY".to_string(),
                    expected: SESSION_KEY_LEN,
                    actual: bytes.len(),
                })?;

        Ok(Self(key))
    }

    /// Serialize as an `oct` JWK
    pub fn to_jwk(&self) -> String {
        serde_json::json!({ "k": URL_SAFE_NO_PAD.encode(self.0), "kty": "oct" }).to_string()
    }

    pub fn as_bytes(&self) -> &[u8; SESSION_KEY_LEN] {
        &self.0
    }
}

impl fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionKey(<redacted>)")
    }
}

/// Centralized manager for application secrets
pub struct SecretManager {
    session_key: SessionKey,
    password_pepper: String,
    recaptcha_secret: Option<String>,
}

impl SecretManager {
    /// Load and validate all secrets
    ///
    /// # Errors
    /// Returns `SecretError` if `JWT_KEY` is absent or malformed, or when the
    /// reCAPTCHA secret is required but missing.
    pub fn from_env_provider(
        env: &dyn EnvironmentProvider,
        captcha_enabled: bool,
    ) -> Result<Self, SecretError> {
        let jwk = env
            .get_var("JWT_KEY")
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| SecretError::missing("JWT_KEY"))?;
        let session_key = SessionKey::from_jwk(&jwk)?;

        let password_pepper = env.get_var("PASSWORD_PEPPER").unwrap_or_default();

        let recaptcha_secret = env
            .get_var("RE_CAPTCHA_SECRET")
            .filter(|value| !value.trim().is_empty());
        if captcha_enabled && recaptcha_secret.is_none() {
            return Err(SecretError::missing("RE_CAPTCHA_SECRET"));
        }

        Ok(Self {
            session_key,
            password_pepper,
            recaptcha_secret,
        })
    }

    /// Build a manager from already validated values
    pub fn new(session_key: SessionKey, password_pepper: impl Into<String>) -> Self {
        Self {
            session_key,
            password_pepper: password_pepper.into(),
            recaptcha_secret: None,
        }
    }

    pub fn session_key(&self) -> &SessionKey {
        &self.session_key
    }

    /// Get the pepper for password hashing (may be empty)
    pub fn password_pepper(&self) -> &str {
        &self.password_pepper
    }

    pub fn recaptcha_secret(&self) -> Option<&str> {
        self.recaptcha_secret.as_deref()
    }
}

impl fmt::Debug for SecretManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretManager")
            .field("session_key", &"<redacted>")
            .field("password_pepper", &"<redacted>")
            .field("recaptcha_secret", &self.recaptcha_secret.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl fmt::Display for SecretManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretManager {{ session_key: <redacted>, password_pepper: <redacted> }}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MockEnvironment;

    const JWK: &str = r#"{"k":"xuQvsl68aTATKRhHjBYo1msJckIJqAj9PooXELeojpY","kty":"oct"}"#;

    #[test]
    fn test_parses_octet_jwk() {
        let key = SessionKey::from_jwk(JWK).unwrap();
        assert_eq!(key.as_bytes().len(), SESSION_KEY_LEN);
    }

    #[test]
    fn test_jwk_roundtrip() {
        let key = SessionKey::new([7u8; SESSION_KEY_LEN]);
        let parsed = SessionKey::from_jwk(&key.to_jwk()).unwrap();
        assert_eq!(parsed, key);
    }

    #[test]
    fn test_rejects_wrong_key_type() {
        let err = SessionKey::from_jwk(r#"{"k":"AAAA","kty":"RSA"}"#).unwrap_err();
        assert!(matches!(err, SecretError::Malformed { .. }));
    }

    #[test]
    fn test_rejects_short_key() {
        let err = SessionKey::from_jwk(r#"{"k":"AAAA","kty":"oct"}"#).unwrap_err();
        assert!(matches!(err, SecretError::InvalidLength { expected: 32, actual: 3, .. }));
    }

    #[test]
    fn test_rejects_non_json() {
        assert!(SessionKey::from_jwk("not-json").is_err());
    }

    #[test]
    fn test_missing_jwt_key_is_fatal() {
        let err = SecretManager::from_env_provider(&MockEnvironment::empty(), false).unwrap_err();
        assert!(matches!(err, SecretError::Missing { .. }));
    }

    #[test]
    fn test_recaptcha_secret_required_when_enabled() {
        let env = MockEnvironment::empty().with_var("JWT_KEY", JWK);

        assert!(SecretManager::from_env_provider(&env, false).is_ok());
        assert!(SecretManager::from_env_provider(&env, true).is_err());

        let env = env.with_var("RE_CAPTCHA_SECRET", "captcha-secret");
        let secrets = SecretManager::from_env_provider(&env, true).unwrap();
        assert_eq!(secrets.recaptcha_secret(), Some("captcha-secret"));
    }

    #[test]
    fn test_debug_output_redacts_secrets() {
        let env = MockEnvironment::empty()
            .with_vars(&[("JWT_KEY", JWK), ("PASSWORD_PEPPER", "pepper-value-123")]);
        let secrets = SecretManager::from_env_provider(&env, false).unwrap();

        let debug = format!("{:?}", secrets);
        let display = format!("{}", secrets);
        assert!(!debug.contains("pepper-value-123"));
        assert!(!debug.contains("xuQvsl68"));
        assert!(!display.contains("pepper-value-123"));
    }
}
