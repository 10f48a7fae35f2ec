use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::app_data::AppData;
use crate::config::{AppSettings, begin_transaction, commit_transaction};
use crate::errors::InternalError;
use crate::errors::internal::{CredentialError, DeliveryError};
use crate::providers::email_provider::{FORGOT_PASSWORD_SUBJECT, forgot_password_email};
use crate::providers::{
    AuthenticationProvider, CaptchaVerifier, CryptoProvider, EmailSender, OtpProvider,
};
use crate::stores::admin_user_store;
use crate::types::db::admin_user;
use crate::types::dto::auth::{
    ConfirmForgotPasswordRequest, ForgotPasswordRequest, LoginRequest, LoginResponse,
    VerifyOtpRequest,
};

/// Orchestrates login, session resolution and the password reset flow
pub struct AuthCoordinator {
    db: DatabaseConnection,
    settings: Arc<AppSettings>,
    authentication_provider: Arc<AuthenticationProvider>,
    crypto_provider: Arc<CryptoProvider>,
    otp_provider: Arc<OtpProvider>,
    email_sender: Arc<dyn EmailSender>,
    captcha_verifier: Arc<dyn CaptchaVerifier>,
}

impl AuthCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            db: app_data.db.clone(),
            settings: app_data.settings.clone(),
            authentication_provider: app_data.providers.authentication_provider.clone(),
            crypto_provider: app_data.providers.crypto_provider.clone(),
            otp_provider: app_data.providers.otp_provider.clone(),
            email_sender: app_data.providers.email_sender.clone(),
            captcha_verifier: app_data.providers.captcha_verifier.clone(),
        }
    }

    /// Resolve the `token` header to the calling admin user
    pub async fn authenticate(&self, token: Option<&str>) -> Result<admin_user::Model, InternalError> {
        self.authentication_provider.resolve(&self.db, token).await
    }

    /// Verify credentials and issue a session token
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, InternalError> {
        let user = self
            .authentication_provider
            .verify_credentials(&self.db, &request.email, &request.password)
            .await?;

        let token = self.authentication_provider.issue_token(&user)?;
        let role = admin_user_store::find_role(&self.db, &user.id).await?;

        tracing::info!(admin_user_id = %user.id, "Admin user logged in");

        Ok(LoginResponse {
            id: user.id,
            name: user.name,
            email: user.email,
            role: role.map(Into::into),
            token,
        })
    }

    /// Send a one-time code to a registered email
    ///
    /// The code is only stored once the mail has been handed to the sender.
    pub async fn forgot_password(&self, request: ForgotPasswordRequest) -> Result<(), InternalError> {
        if self.settings.captcha_enabled()
            && !self
                .captcha_verifier
                .verify(request.captcha_token.as_deref())
                .await?
        {
            return Err(DeliveryError::CaptchaRejected.into());
        }

        let txn = begin_transaction(&self.db).await?;

        let user = admin_user_store::find_active_by_email(&txn, &request.email)
            .await?
            .ok_or(CredentialError::InvalidCredentials)?;

        let code = self.otp_provider.issue(&txn, &user.id).await?;
        let body = forgot_password_email(&user.name, &code);

        if !self
            .email_sender
            .send(std::slice::from_ref(&user.email), FORGOT_PASSWORD_SUBJECT, &body)
            .await
        {
            return Err(DeliveryError::EmailFailed {
                recipient: user.email,
            }
            .into());
        }

        commit_transaction(txn).await?;
        tracing::info!(admin_user_id = %user.id, "Password reset code sent");

        Ok(())
    }

    pub async fn verify_otp(&self, request: VerifyOtpRequest) -> Result<(), InternalError> {
        let txn = begin_transaction(&self.db).await?;
        let user = self
            .otp_provider
            .redeem(&txn, &request.email, &request.otp)
            .await?;
        commit_transaction(txn).await?;

        tracing::info!(admin_user_id = %user.id, "Password reset code redeemed");
        Ok(())
    }

    /// Set a new password for a registered email whose reset code was verified
    pub async fn confirm_forgot_password(
        &self,
        request: ConfirmForgotPasswordRequest,
    ) -> Result<(), InternalError> {
        let txn = begin_transaction(&self.db).await?;

        let user = admin_user_store::find_active_by_email(&txn, &request.email)
            .await?
            .ok_or_else(|| CredentialError::EmailNotRegistered(request.email.clone()))?;

        if request.password != request.confirm_password {
            return Err(CredentialError::PasswordMismatch.into());
        }

        self.otp_provider.consume_verified(&txn, &user.id).await?;

        let password_hash = self.crypto_provider.hash_password(&request.password)?;
        let user = admin_user_store::set_password_hash(&txn, user, password_hash).await?;
        commit_transaction(txn).await?;

        tracing::info!(admin_user_id = %user.id, "Password reset completed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::internal::OtpError;
    use crate::providers::MemoryEmailSender;
    use crate::stores::otp_store;
    use crate::test::utils::{
        SUPER_ADMIN_EMAIL, TEST_PASSWORD, seed_super_admin, setup_test_app,
        setup_test_app_with_sender,
    };

    fn forgot(email: &str) -> ForgotPasswordRequest {
        ForgotPasswordRequest {
            email: email.to_string(),
            captcha_token: None,
        }
    }

    fn confirm(password: &str, confirm_password: &str) -> ConfirmForgotPasswordRequest {
        ConfirmForgotPasswordRequest {
            email: SUPER_ADMIN_EMAIL.to_string(),
            password: password.to_string(),
            confirm_password: confirm_password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_returns_token_that_authenticates() {
        let (app_data, _) = setup_test_app().await;
        let root = seed_super_admin(&app_data).await;
        let coordinator = AuthCoordinator::new(app_data);

        let response = coordinator
            .login(LoginRequest {
                email: SUPER_ADMIN_EMAIL.to_string(),
                password: TEST_PASSWORD.to_string(),
            })
            .await
            .unwrap();

        assert_eq!(response.id, root.id);
        assert!(response.role.is_some());
        let resolved = coordinator.authenticate(Some(&response.token)).await.unwrap();
        assert_eq!(resolved.id, root.id);
    }

    #[tokio::test]
    async fn test_login_with_wrong_password_fails() {
        let (app_data, _) = setup_test_app().await;
        seed_super_admin(&app_data).await;
        let coordinator = AuthCoordinator::new(app_data);

        let result = coordinator
            .login(LoginRequest {
                email: SUPER_ADMIN_EMAIL.to_string(),
                password: "wrong".to_string(),
            })
            .await;

        assert!(matches!(
            result,
            Err(InternalError::Credential(CredentialError::InvalidCredentials))
        ));
    }

    #[tokio::test]
    async fn test_failed_delivery_stores_no_code() {
        let (app_data, sender) =
            setup_test_app_with_sender(Arc::new(MemoryEmailSender::failing())).await;
        let root = seed_super_admin(&app_data).await;
        let coordinator = AuthCoordinator::new(app_data.clone());

        let result = coordinator.forgot_password(forgot(SUPER_ADMIN_EMAIL)).await;

        assert!(matches!(
            result,
            Err(InternalError::Delivery(DeliveryError::EmailFailed { .. }))
        ));
        assert!(sender.sent().is_empty());
        let stored = otp_store::latest_for(&app_data.db, &root.id).await.unwrap();
        assert!(stored.is_none());
    }

    #[tokio::test]
    async fn test_forgot_password_for_unknown_email_fails() {
        let (app_data, sender) = setup_test_app().await;
        seed_super_admin(&app_data).await;
        let coordinator = AuthCoordinator::new(app_data);

        let result = coordinator.forgot_password(forgot("nobody@example.com")).await;

        assert!(result.is_err());
        assert!(sender.sent().is_empty());
    }

    #[tokio::test]
    async fn test_password_reset_flow() {
        let (app_data, sender) = setup_test_app().await;
        let root = seed_super_admin(&app_data).await;
        let coordinator = AuthCoordinator::new(app_data.clone());

        coordinator
            .forgot_password(forgot(SUPER_ADMIN_EMAIL))
            .await
            .unwrap();

        let sent = sender.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].recipients, vec![SUPER_ADMIN_EMAIL.to_string()]);
        assert_eq!(sent[0].subject, FORGOT_PASSWORD_SUBJECT);

        let code = otp_store::latest_for(&app_data.db, &root.id)
            .await
            .unwrap()
            .unwrap()
            .otp;
        assert!(sent[0].html_body.contains(&code));

        let result = coordinator
            .confirm_forgot_password(confirm("new-password", "new-password"))
            .await;
        assert!(matches!(result, Err(InternalError::Otp(OtpError::Mismatch))));

        coordinator
            .verify_otp(VerifyOtpRequest {
                email: SUPER_ADMIN_EMAIL.to_string(),
                otp: code,
            })
            .await
            .unwrap();

        let result = coordinator
            .confirm_forgot_password(confirm("new-password", "other-password"))
            .await;
        assert!(matches!(
            result,
            Err(InternalError::Credential(CredentialError::PasswordMismatch))
        ));

        coordinator
            .confirm_forgot_password(confirm("new-password", "new-password"))
            .await
            .unwrap();

        coordinator
            .login(LoginRequest {
                email: SUPER_ADMIN_EMAIL.to_string(),
                password: "new-password".to_string(),
            })
            .await
            .unwrap();

        // The verified code is spent by the reset
        let result = coordinator
            .confirm_forgot_password(confirm("hijacked-password", "hijacked-password"))
            .await;
        assert!(matches!(result, Err(InternalError::Otp(OtpError::Mismatch))));
        coordinator
            .login(LoginRequest {
                email: SUPER_ADMIN_EMAIL.to_string(),
                password: "new-password".to_string(),
            })
            .await
            .unwrap();
    }
}
