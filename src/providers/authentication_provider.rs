use std::sync::Arc;

use sea_orm::ConnectionTrait;

use crate::errors::InternalError;
use crate::errors::internal::{CredentialError, SessionError};
use crate::providers::{CryptoProvider, TokenProvider};
use crate::stores::admin_user_store;
use crate::types::db::admin_user;

/// Authenticates admin users by password and by session token
pub struct AuthenticationProvider {
    token_provider: Arc<TokenProvider>,
    crypto_provider: Arc<CryptoProvider>,
}

impl AuthenticationProvider {
    pub fn new(token_provider: Arc<TokenProvider>, crypto_provider: Arc<CryptoProvider>) -> Self {
        Self {
            token_provider,
            crypto_provider,
        }
    }

    /// Check email and password, returning the admin user on success
    ///
    /// Unknown email, soft-deleted account and wrong password all fail with
    /// the same `InvalidCredentials` error.
    pub async fn verify_credentials(
        &self,
        conn: &impl ConnectionTrait,
        email: &str,
        password: &str,
    ) -> Result<admin_user::Model, InternalError> {
        let Some(user) = admin_user_store::find_active_by_email(conn, email).await? else {
            tracing::debug!("Login attempt for unknown email");
            return Err(CredentialError::InvalidCredentials.into());
        };

        if !self.crypto_provider.verify_password(password, &user.password_hash)? {
            tracing::debug!(admin_user_id = %user.id, "Login attempt with wrong password");
            return Err(CredentialError::InvalidCredentials.into());
        }

        Ok(user)
    }

    /// Issue a session token for the admin user
    pub fn issue_token(&self, user: &admin_user::Model) -> Result<String, InternalError> {
        self.token_provider.issue(&user.id, &user.email)
    }

    /// Resolve a session token to its non-deleted admin user
    pub async fn resolve(
        &self,
        conn: &impl ConnectionTrait,
        token: Option<&str>,
    ) -> Result<admin_user::Model, InternalError> {
        let token = token
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(SessionError::MissingToken)?;

        let claims = self.token_provider.decode(token)?;

        admin_user_store::find_active_by_id(conn, &claims.id)
            .await?
            .ok_or_else(|| {
                SessionError::UnknownAdminUser {
                    admin_user_id: claims.id,
                }
                .into()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::{TEST_PASSWORD, create_admin_user, setup_test_app};

    #[tokio::test]
    async fn test_resolve_issued_token_returns_user() {
        let (app_data, _) = setup_test_app().await;
        let provider = &app_data.providers.authentication_provider;
        let user = create_admin_user(&app_data, "Jane", "jane@example.com", None).await;

        let token = provider.issue_token(&user).unwrap();
        let resolved = provider.resolve(&app_data.db, Some(&token)).await.unwrap();

        assert_eq!(resolved.id, user.id);
        assert_eq!(resolved.email, "jane@example.com");
    }

    #[tokio::test]
    async fn test_resolve_rejects_missing_and_blank_tokens() {
        let (app_data, _) = setup_test_app().await;
        let provider = &app_data.providers.authentication_provider;

        for token in [None, Some(""), Some("   ")] {
            let result = provider.resolve(&app_data.db, token).await;
            assert!(matches!(
                result,
                Err(InternalError::Session(SessionError::MissingToken))
            ));
        }
    }

    #[tokio::test]
    async fn test_resolve_rejects_deleted_user() {
        let (app_data, _) = setup_test_app().await;
        let provider = &app_data.providers.authentication_provider;
        let user = create_admin_user(&app_data, "Jane", "jane@example.com", None).await;
        let token = provider.issue_token(&user).unwrap();

        admin_user_store::soft_delete(&app_data.db, user).await.unwrap();
        let result = provider.resolve(&app_data.db, Some(&token)).await;

        assert!(matches!(
            result,
            Err(InternalError::Session(SessionError::UnknownAdminUser { .. }))
        ));
    }

    #[tokio::test]
    async fn test_verify_credentials() {
        let (app_data, _) = setup_test_app().await;
        let provider = &app_data.providers.authentication_provider;
        let user = create_admin_user(&app_data, "Jane", "jane@example.com", None).await;

        let verified = provider
            .verify_credentials(&app_data.db, "jane@example.com", TEST_PASSWORD)
            .await
            .unwrap();
        assert_eq!(verified.id, user.id);

        let wrong_password = provider
            .verify_credentials(&app_data.db, "jane@example.com", "not-the-password")
            .await;
        assert!(matches!(
            wrong_password,
            Err(InternalError::Credential(CredentialError::InvalidCredentials))
        ));

        // Email lookup is case-sensitive
        let wrong_case = provider
            .verify_credentials(&app_data.db, "JANE@example.com", TEST_PASSWORD)
            .await;
        assert!(matches!(
            wrong_case,
            Err(InternalError::Credential(CredentialError::InvalidCredentials))
        ));
    }
}
