use std::collections::HashSet;
use std::sync::Arc;

use aes_gcm::aead::{Aead, KeyInit, Payload};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use aes_kw::KekAes256;
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand_core::{OsRng, RngCore};
use serde::Deserialize;

use crate::config::SecretManager;
use crate::errors::InternalError;
use crate::errors::internal::SessionError;
use crate::types::internal::auth::SessionClaims;

const JWE_HEADER: &str = r#"{"alg":"A256KW","enc":"A256GCM","cty":"JWT"}"#;
const CEK_LEN: usize = 32;
const WRAPPED_CEK_LEN: usize = CEK_LEN + 8;
const IV_LEN: usize = 12;
const TAG_LEN: usize = 16;

#[derive(Deserialize)]
struct JweHeader {
    alg: String,
    enc: String,
}

/// Issues and decodes stateless session tokens
///
/// The inner token is a compact HS256 JWS carrying `{id, email, iat}`. It is
/// then encrypted into a compact JWE (A256KW key wrap, A256GCM content) with
/// the same key. Tokens carry no expiry.
pub struct TokenProvider {
    secret_manager: Arc<SecretManager>,
}

impl TokenProvider {
    pub fn new(secret_manager: Arc<SecretManager>) -> Self {
        Self { secret_manager }
    }

    /// Issue a token for the admin user, stamped with the current time
    pub fn issue(&self, admin_user_id: &str, email: &str) -> Result<String, InternalError> {
        self.issue_at(admin_user_id, email, Utc::now().timestamp())
    }

    pub fn issue_at(
        &self,
        admin_user_id: &str,
        email: &str,
        issued_at: i64,
    ) -> Result<String, InternalError> {
        let claims = SessionClaims {
            id: admin_user_id.to_string(),
            email: email.to_string(),
            iat: issued_at,
        };

        let signed = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.key()),
        )
        .map_err(|e| InternalError::crypto("jws_sign", e.to_string()))?;

        self.encrypt(signed.as_bytes())
    }

    /// Decrypt the outer token, verify the inner signature and return the claims
    ///
    /// # Errors
    /// `SessionError::InvalidToken` for any malformed, tampered or foreign token
    pub fn decode(&self, token: &str) -> Result<SessionClaims, InternalError> {
        let inner = self.decrypt(token)?;
        let inner = String::from_utf8(inner)
            .map_err(|_| SessionError::invalid("inner token is not UTF-8"))?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims = HashSet::new();
        validation.validate_exp = false;

        let data = decode::<SessionClaims>(&inner, &DecodingKey::from_secret(self.key()), &validation)
            .map_err(|e| SessionError::invalid(format!("signature check failed: {}", e)))?;

        Ok(data.claims)
    }

    fn key(&self) -> &[u8] {
        self.secret_manager.session_key().as_bytes()
    }

    fn kek(&self) -> KekAes256 {
        KekAes256::from(*self.secret_manager.session_key().as_bytes())
    }

    fn encrypt(&self, plaintext: &[u8]) -> Result<String, InternalError> {
        let protected = URL_SAFE_NO_PAD.encode(JWE_HEADER);

        let mut cek = [0u8; CEK_LEN];
        OsRng.fill_bytes(&mut cek);
        let mut iv = [0u8; IV_LEN];
        OsRng.fill_bytes(&mut iv);

        let mut wrapped = [0u8; WRAPPED_CEK_LEN];
        self.kek()
            .wrap(&cek, &mut wrapped)
            .map_err(|e| InternalError::crypto("jwe_key_wrap", e.to_string()))?;

        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&cek));
        let sealed = cipher
            .encrypt(
                Nonce::from_slice(&iv),
                Payload {
                    msg: plaintext,
                    aad: protected.as_bytes(),
                },
            )
            .map_err(|e| InternalError::crypto("jwe_encrypt", e.to_string()))?;
        let (ciphertext, tag) = sealed.split_at(sealed.len() - TAG_LEN);

        Ok(format!(
            "{}.{}.{}.{}.{}",
            protected,
            URL_SAFE_NO_PAD.encode(wrapped),
            URL_SAFE_NO_PAD.encode(iv),
            URL_SAFE_NO_PAD.encode(ciphertext),
            URL_SAFE_NO_PAD.encode(tag),
        ))
    }

    fn decrypt(&self, token: &str) -> Result<Vec<u8>, InternalError> {
        let segments: Vec<&str> = token.trim().split('.').collect();
        let [protected, wrapped, iv, ciphertext, tag] = segments.as_slice() else {
            return Err(SessionError::invalid("expected five JWE segments").into());
        };

        let header: JweHeader = serde_json::from_slice(&b64(protected)?)
            .map_err(|_| SessionError::invalid("unreadable JWE header"))?;
        if header.alg != "A256KW" || header.enc != "A256GCM" {
            return Err(SessionError::invalid(format!(
                "unsupported JWE algorithms {}/{}",
                header.alg, header.enc
            ))
            .into());
        }

        let wrapped = b64(wrapped)?;
        let iv = b64(iv)?;
        let tag = b64(tag)?;
        if wrapped.len() != WRAPPED_CEK_LEN || iv.len() != IV_LEN || tag.len() != TAG_LEN {
            return Err(SessionError::invalid("JWE segment has wrong length").into());
        }

        let mut cek = [0u8; CEK_LEN];
        self.kek()
            .unwrap(&wrapped, &mut cek)
            .map_err(|_| SessionError::invalid("content key unwrap failed"))?;

        let mut sealed = b64(ciphertext)?;
        sealed.extend_from_slice(&tag);

        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&cek));
        let plaintext = cipher
            .decrypt(
                Nonce::from_slice(&iv),
                Payload {
                    msg: &sealed,
                    aad: protected.as_bytes(),
                },
            )
            .map_err(|_| SessionError::invalid("content decryption failed"))?;

        Ok(plaintext)
    }
}

fn b64(segment: &str) -> Result<Vec<u8>, InternalError> {
    URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| SessionError::invalid("segment is not base64url").into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SESSION_KEY_LEN, SessionKey};

    fn create_provider(byte: u8) -> TokenProvider {
        let secrets = SecretManager::new(SessionKey::new([byte; SESSION_KEY_LEN]), "");
        TokenProvider::new(Arc::new(secrets))
    }

    fn is_invalid_token(result: Result<SessionClaims, InternalError>) -> bool {
        matches!(
            result,
            Err(InternalError::Session(SessionError::InvalidToken { .. }))
        )
    }

    #[test]
    fn test_issue_then_decode() {
        let provider = create_provider(9);
        let token = provider.issue_at("user-1", "user@example.com", 1_700_000_000).unwrap();

        let claims = provider.decode(&token).unwrap();
        assert_eq!(claims.id, "user-1");
        assert_eq!(claims.email, "user@example.com");
        assert_eq!(claims.iat, 1_700_000_000);
    }

    #[test]
    fn test_token_is_compact_jwe() {
        let token = create_provider(9).issue("user-1", "user@example.com").unwrap();
        let segments: Vec<&str> = token.split('.').collect();

        assert_eq!(segments.len(), 5);
        let header = URL_SAFE_NO_PAD.decode(segments[0]).unwrap();
        assert_eq!(header, JWE_HEADER.as_bytes());
        // Claims are not readable without the key
        assert!(!token.contains("user@example.com"));
    }

    #[test]
    fn test_old_tokens_never_expire() {
        let provider = create_provider(9);
        let token = provider.issue_at("user-1", "user@example.com", 0).unwrap();
        assert!(provider.decode(&token).is_ok());
    }

    #[test]
    fn test_every_flipped_character_is_rejected() {
        let provider = create_provider(3);
        let token = provider.issue("user-1", "user@example.com").unwrap();

        for position in 0..token.len() {
            let mut bytes = token.clone().into_bytes();
            if bytes[position] == b'.' {
                continue;
            }
            bytes[position] = if bytes[position] == b'A' { b'B' } else { b'A' };
            let tampered = String::from_utf8(bytes).unwrap();
            if tampered == token {
                continue;
            }
            assert!(
                provider.decode(&tampered).is_err(),
                "tampered token accepted at position {}",
                position
            );
        }
    }

    #[test]
    fn test_foreign_key_is_rejected() {
        let token = create_provider(1).issue("user-1", "user@example.com").unwrap();
        assert!(is_invalid_token(create_provider(2).decode(&token)));
    }

    #[test]
    fn test_garbage_is_rejected() {
        let provider = create_provider(1);
        assert!(is_invalid_token(provider.decode("")));
        assert!(is_invalid_token(provider.decode("a.b.c")));
        assert!(is_invalid_token(provider.decode("a.b.c.d.e")));
    }

    #[test]
    fn test_bare_inner_token_is_rejected() {
        let provider = create_provider(1);
        let claims = SessionClaims {
            id: "user-1".to_string(),
            email: "user@example.com".to_string(),
            iat: 0,
        };
        let signed = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(&[1u8; SESSION_KEY_LEN]),
        )
        .unwrap();

        assert!(is_invalid_token(provider.decode(&signed)));
    }
}
