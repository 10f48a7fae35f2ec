use std::sync::Arc;

use chrono::Utc;
use sea_orm::ConnectionTrait;

use crate::errors::InternalError;
use crate::errors::internal::{CredentialError, OtpError};
use crate::providers::CryptoProvider;
use crate::stores::{admin_user_store, otp_store};
use crate::types::db::admin_user;

/// Whole minutes after which a code can no longer be redeemed
pub const OTP_VALIDITY_MINUTES: i64 = 10;

/// Issues and redeems password reset codes
pub struct OtpProvider {
    crypto_provider: Arc<CryptoProvider>,
}

impl OtpProvider {
    pub fn new(crypto_provider: Arc<CryptoProvider>) -> Self {
        Self { crypto_provider }
    }

    /// Generate and store a fresh code for the admin user
    pub async fn issue(
        &self,
        conn: &impl ConnectionTrait,
        admin_user_id: &str,
    ) -> Result<String, InternalError> {
        self.issue_at(conn, admin_user_id, Utc::now().timestamp()).await
    }

    pub async fn issue_at(
        &self,
        conn: &impl ConnectionTrait,
        admin_user_id: &str,
        now: i64,
    ) -> Result<String, InternalError> {
        let code = self.crypto_provider.generate_otp_code();
        otp_store::insert(conn, admin_user_id, &code, now).await?;
        Ok(code)
    }

    /// Redeem the admin user's latest code
    pub async fn redeem(
        &self,
        conn: &impl ConnectionTrait,
        email: &str,
        code: &str,
    ) -> Result<admin_user::Model, InternalError> {
        self.redeem_at(conn, email, code, Utc::now().timestamp()).await
    }

    /// Redeem against an explicit clock
    ///
    /// Checks run in a fixed order: already redeemed, then expired, then
    /// mismatch. Only the most recently created code is considered.
    pub async fn redeem_at(
        &self,
        conn: &impl ConnectionTrait,
        email: &str,
        code: &str,
        now: i64,
    ) -> Result<admin_user::Model, InternalError> {
        let user = admin_user_store::find_active_by_email(conn, email)
            .await?
            .ok_or_else(|| CredentialError::EmailNotRegistered(email.to_string()))?;

        let otp = otp_store::latest_for(conn, &user.id)
            .await?
            .ok_or_else(|| OtpError::NoChallenge {
                admin_user_id: user.id.clone(),
            })?;

        if otp.is_redeemed {
            return Err(OtpError::AlreadyRedeemed.into());
        }
        if elapsed_minutes(otp.created_at, now) >= OTP_VALIDITY_MINUTES {
            return Err(OtpError::Expired.into());
        }
        if otp.otp != code {
            return Err(OtpError::Mismatch.into());
        }

        otp_store::mark_redeemed(conn, otp, now).await?;
        admin_user_store::touch(conn, user).await
    }

    /// Spend the admin user's latest code on a password reset
    ///
    /// The code must have been redeemed, not yet consumed and still be inside
    /// its validity window. Each verified code allows exactly one reset.
    pub async fn consume_verified(
        &self,
        conn: &impl ConnectionTrait,
        admin_user_id: &str,
    ) -> Result<(), InternalError> {
        self.consume_verified_at(conn, admin_user_id, Utc::now().timestamp())
            .await
    }

    pub async fn consume_verified_at(
        &self,
        conn: &impl ConnectionTrait,
        admin_user_id: &str,
        now: i64,
    ) -> Result<(), InternalError> {
        let otp = otp_store::latest_for(conn, admin_user_id)
            .await?
            .ok_or(OtpError::Mismatch)?;

        if !otp.is_redeemed || otp.is_consumed {
            return Err(OtpError::Mismatch.into());
        }
        if elapsed_minutes(otp.created_at, now) >= OTP_VALIDITY_MINUTES {
            return Err(OtpError::Expired.into());
        }

        otp_store::mark_consumed(conn, otp, now).await
    }
}

/// Whole minutes between two unix timestamps, rounded down
pub fn elapsed_minutes(created_at: i64, now: i64) -> i64 {
    (now - created_at).div_euclid(60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_minutes_floors() {
        assert_eq!(elapsed_minutes(0, 0), 0);
        assert_eq!(elapsed_minutes(0, 59), 0);
        assert_eq!(elapsed_minutes(0, 60), 1);
        assert_eq!(elapsed_minutes(0, 599), 9);
        assert_eq!(elapsed_minutes(0, 600), 10);
        assert_eq!(elapsed_minutes(100, 40), -1);
    }

    use crate::test::utils::{create_admin_user, setup_test_app};

    const T0: i64 = 1_700_000_000;

    async fn setup() -> (std::sync::Arc<crate::app_data::AppData>, admin_user::Model) {
        let (app_data, _) = setup_test_app().await;
        let user = create_admin_user(&app_data, "Jane", "jane@example.com", None).await;
        (app_data, user)
    }

    #[tokio::test]
    async fn test_issue_generates_six_digits() {
        let (app_data, user) = setup().await;
        let otp = &app_data.providers.otp_provider;

        let code = otp.issue_at(&app_data.db, &user.id, T0).await.unwrap();

        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_digit()));
    }

    #[tokio::test]
    async fn test_redeem_just_inside_window_succeeds() {
        let (app_data, user) = setup().await;
        let otp = &app_data.providers.otp_provider;
        let code = otp.issue_at(&app_data.db, &user.id, T0).await.unwrap();

        let redeemed = otp
            .redeem_at(&app_data.db, "jane@example.com", &code, T0 + 599)
            .await
            .unwrap();

        assert_eq!(redeemed.id, user.id);
    }

    #[tokio::test]
    async fn test_redeem_at_ten_minutes_is_expired_even_with_wrong_code() {
        let (app_data, user) = setup().await;
        let otp = &app_data.providers.otp_provider;
        let code = otp.issue_at(&app_data.db, &user.id, T0).await.unwrap();

        let result = otp
            .redeem_at(&app_data.db, "jane@example.com", &code, T0 + 600)
            .await;
        assert!(matches!(result, Err(InternalError::Otp(OtpError::Expired))));

        let result = otp
            .redeem_at(&app_data.db, "jane@example.com", "xxxxxx", T0 + 900)
            .await;
        assert!(matches!(result, Err(InternalError::Otp(OtpError::Expired))));
    }

    #[tokio::test]
    async fn test_redeem_twice_reports_already_redeemed() {
        let (app_data, user) = setup().await;
        let otp = &app_data.providers.otp_provider;
        let code = otp.issue_at(&app_data.db, &user.id, T0).await.unwrap();

        otp.redeem_at(&app_data.db, "jane@example.com", &code, T0 + 10)
            .await
            .unwrap();
        // Redeemed takes precedence over expiry
        let result = otp
            .redeem_at(&app_data.db, "jane@example.com", &code, T0 + 6000)
            .await;

        assert!(matches!(
            result,
            Err(InternalError::Otp(OtpError::AlreadyRedeemed))
        ));
    }

    #[tokio::test]
    async fn test_redeem_wrong_code_is_mismatch() {
        let (app_data, user) = setup().await;
        let otp = &app_data.providers.otp_provider;
        let code = otp.issue_at(&app_data.db, &user.id, T0).await.unwrap();
        let wrong = if code == "000000" { "111111" } else { "000000" };

        let result = otp
            .redeem_at(&app_data.db, "jane@example.com", wrong, T0 + 30)
            .await;

        assert!(matches!(result, Err(InternalError::Otp(OtpError::Mismatch))));
    }

    #[tokio::test]
    async fn test_only_latest_code_counts() {
        let (app_data, user) = setup().await;
        let otp = &app_data.providers.otp_provider;
        let first = otp.issue_at(&app_data.db, &user.id, T0).await.unwrap();
        let second = otp.issue_at(&app_data.db, &user.id, T0 + 60).await.unwrap();

        if first != second {
            let result = otp
                .redeem_at(&app_data.db, "jane@example.com", &first, T0 + 90)
                .await;
            assert!(matches!(result, Err(InternalError::Otp(OtpError::Mismatch))));
        }

        otp.redeem_at(&app_data.db, "jane@example.com", &second, T0 + 90)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_redeem_unknown_email_and_missing_challenge() {
        let (app_data, _user) = setup().await;
        let otp = &app_data.providers.otp_provider;

        let result = otp
            .redeem_at(&app_data.db, "nobody@example.com", "123456", T0)
            .await;
        assert!(matches!(
            result,
            Err(InternalError::Credential(CredentialError::EmailNotRegistered(_)))
        ));

        let result = otp
            .redeem_at(&app_data.db, "jane@example.com", "123456", T0)
            .await;
        assert!(matches!(
            result,
            Err(InternalError::Otp(OtpError::NoChallenge { .. }))
        ));
    }

    #[tokio::test]
    async fn test_consume_requires_redeemed_code() {
        let (app_data, user) = setup().await;
        let otp = &app_data.providers.otp_provider;

        let result = otp.consume_verified_at(&app_data.db, &user.id, T0).await;
        assert!(matches!(result, Err(InternalError::Otp(OtpError::Mismatch))));

        otp.issue_at(&app_data.db, &user.id, T0).await.unwrap();
        let result = otp.consume_verified_at(&app_data.db, &user.id, T0 + 5).await;
        assert!(matches!(result, Err(InternalError::Otp(OtpError::Mismatch))));
    }

    #[tokio::test]
    async fn test_consume_after_window_is_expired() {
        let (app_data, user) = setup().await;
        let otp = &app_data.providers.otp_provider;
        let code = otp.issue_at(&app_data.db, &user.id, T0).await.unwrap();
        otp.redeem_at(&app_data.db, "jane@example.com", &code, T0 + 10)
            .await
            .unwrap();

        let result = otp.consume_verified_at(&app_data.db, &user.id, T0 + 600).await;

        assert!(matches!(result, Err(InternalError::Otp(OtpError::Expired))));
    }

    #[tokio::test]
    async fn test_verified_code_is_consumed_once() {
        let (app_data, user) = setup().await;
        let otp = &app_data.providers.otp_provider;
        let code = otp.issue_at(&app_data.db, &user.id, T0).await.unwrap();
        otp.redeem_at(&app_data.db, "jane@example.com", &code, T0 + 10)
            .await
            .unwrap();

        otp.consume_verified_at(&app_data.db, &user.id, T0 + 599)
            .await
            .unwrap();
        let stored = otp_store::latest_for(&app_data.db, &user.id)
            .await
            .unwrap()
            .unwrap();
        assert!(stored.is_redeemed);
        assert!(stored.is_consumed);

        let result = otp.consume_verified_at(&app_data.db, &user.id, T0 + 599).await;
        assert!(matches!(result, Err(InternalError::Otp(OtpError::Mismatch))));
    }
}
