use std::sync::Arc;

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
    password_hash::SaltString,
};
use rand::Rng;

use crate::config::{HashingSettings, SecretManager};
use crate::errors::InternalError;
use crate::errors::internal::CredentialError;

/// Number of digits in a one-time password
pub const OTP_LENGTH: usize = 6;

/// Cryptographic operations provider
///
/// Hashes and verifies admin user passwords with Argon2id (PHC string format,
/// salt and parameters embedded) using a fixed work factor and the optional
/// password pepper as the Argon2 secret. Also generates one-time codes.
pub struct CryptoProvider {
    secret_manager: Arc<SecretManager>,
    params: Params,
}

impl CryptoProvider {
    /// Create a new CryptoProvider
    ///
    /// # Errors
    /// Returns `InternalError::Crypto` when the work factor is rejected by Argon2
    pub fn new(
        secret_manager: Arc<SecretManager>,
        hashing: HashingSettings,
    ) -> Result<Self, InternalError> {
        let params = Params::new(hashing.memory_kib, hashing.iterations, hashing.parallelism, None)
            .map_err(|e| InternalError::crypto("argon2_params", e.to_string()))?;

        Ok(Self {
            secret_manager,
            params,
        })
    }

    fn argon2(&self) -> Result<Argon2<'_>, InternalError> {
        let pepper = self.secret_manager.password_pepper().as_bytes();
        if pepper.is_empty() {
            return Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone()));
        }

        Argon2::new_with_secret(pepper, Algorithm::Argon2id, Version::V0x13, self.params.clone())
            .map_err(|e| InternalError::crypto("argon2_init", e.to_string()))
    }

    /// Hash a plaintext password with a fresh random salt
    pub fn hash_password(&self, password: &str) -> Result<String, InternalError> {
        let salt = SaltString::generate(&mut rand_core::OsRng);

        let digest = self
            .argon2()?
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| CredentialError::PasswordHashingFailed(e.to_string()))?
            .to_string();

        Ok(digest)
    }

    /// Verify a plaintext password against a stored digest
    ///
    /// A malformed digest is treated as a mismatch.
    pub fn verify_password(&self, password: &str, digest: &str) -> Result<bool, InternalError> {
        let parsed = match PasswordHash::new(digest) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Stored password digest is malformed: {}", e);
                return Ok(false);
            }
        };

        Ok(self
            .argon2()?
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }

    /// Generate a 6-digit numeric code, each digit drawn independently
    pub fn generate_otp_code(&self) -> String {
        let mut rng = rand::rng();
        (0..OTP_LENGTH)
            .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SESSION_KEY_LEN, SessionKey};

    fn test_hashing() -> HashingSettings {
        HashingSettings {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        }
    }

    fn create_provider(pepper: &str) -> CryptoProvider {
        let secrets = SecretManager::new(SessionKey::new([1u8; SESSION_KEY_LEN]), pepper);
        CryptoProvider::new(Arc::new(secrets), test_hashing()).unwrap()
    }

    #[test]
    fn test_hash_then_verify() {
        let crypto = create_provider("pepper");
        let digest = crypto.hash_password("correct horse").unwrap();

        assert!(digest.starts_with("$argon2id$"));
        assert!(crypto.verify_password("correct horse", &digest).unwrap());
        assert!(!crypto.verify_password("wrong horse", &digest).unwrap());
    }

    #[test]
    fn test_same_password_hashes_differently() {
        let crypto = create_provider("");
        let first = crypto.hash_password("s3cret-pass").unwrap();
        let second = crypto.hash_password("s3cret-pass").unwrap();

        assert_ne!(first, second);
        assert!(crypto.verify_password("s3cret-pass", &first).unwrap());
        assert!(crypto.verify_password("s3cret-pass", &second).unwrap());
    }

    #[test]
    fn test_malformed_digest_is_no_match() {
        let crypto = create_provider("pepper");
        assert!(!crypto.verify_password("anything", "not-a-digest").unwrap());
        assert!(!crypto.verify_password("anything", "").unwrap());
    }

    #[test]
    fn test_pepper_is_part_of_the_hash() {
        let digest = create_provider("pepper-a").hash_password("password").unwrap();
        assert!(!create_provider("pepper-b").verify_password("password", &digest).unwrap());
    }

    #[test]
    fn test_otp_code_shape() {
        let crypto = create_provider("");
        for _ in 0..50 {
            let code = crypto.generate_otp_code();
            assert_eq!(code.len(), OTP_LENGTH);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }
}
