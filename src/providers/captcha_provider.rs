use async_trait::async_trait;
use serde::Deserialize;

use crate::errors::InternalError;
use crate::errors::internal::DeliveryError;

const RECAPTCHA_VERIFY_URL: &str = "https://www.google.com/recaptcha/api/siteverify";

/// CAPTCHA token check performed before sending password reset mail
#[async_trait]
pub trait CaptchaVerifier: Send + Sync {
    /// `Ok(true)` when the token is accepted
    async fn verify(&self, token: Option<&str>) -> Result<bool, InternalError>;
}

/// Verifier used when CAPTCHA is disabled; accepts everything
#[derive(Debug, Clone, Default)]
pub struct DisabledCaptcha;

#[async_trait]
impl CaptchaVerifier for DisabledCaptcha {
    async fn verify(&self, _token: Option<&str>) -> Result<bool, InternalError> {
        Ok(true)
    }
}

#[derive(Deserialize)]
struct SiteVerifyResponse {
    success: bool,
    #[serde(default, rename = "error-codes")]
    error_codes: Vec<String>,
}

/// Google reCAPTCHA verifier
pub struct RecaptchaVerifier {
    secret: String,
    client: reqwest::Client,
}

impl RecaptchaVerifier {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl CaptchaVerifier for RecaptchaVerifier {
    async fn verify(&self, token: Option<&str>) -> Result<bool, InternalError> {
        let Some(token) = token.filter(|token| !token.trim().is_empty()) else {
            return Ok(false);
        };

        let response = self
            .client
            .post(RECAPTCHA_VERIFY_URL)
            .form(&[("secret", self.secret.as_str()), ("response", token)])
            .send()
            .await
            .map_err(|e| DeliveryError::CaptchaUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(DeliveryError::CaptchaUnavailable(format!(
                "siteverify returned status: {}",
                response.status()
            ))
            .into());
        }

        let body: SiteVerifyResponse = response
            .json()
            .await
            .map_err(|e| DeliveryError::CaptchaUnavailable(e.to_string()))?;

        if !body.success {
            tracing::debug!(errors = ?body.error_codes, "reCAPTCHA rejected token");
        }

        Ok(body.success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_captcha_accepts_anything() {
        let verifier = DisabledCaptcha;
        assert!(verifier.verify(None).await.unwrap());
        assert!(verifier.verify(Some("whatever")).await.unwrap());
    }

    #[tokio::test]
    async fn test_recaptcha_rejects_missing_token_without_calling_out() {
        let verifier = RecaptchaVerifier::new("secret");
        assert!(!verifier.verify(None).await.unwrap());
        assert!(!verifier.verify(Some("  ")).await.unwrap());
    }

    #[test]
    fn test_siteverify_response_parsing() {
        let body: SiteVerifyResponse =
            serde_json::from_str(r#"{"success":false,"error-codes":["invalid-input-response"]}"#)
                .unwrap();
        assert!(!body.success);
        assert_eq!(body.error_codes, vec!["invalid-input-response".to_string()]);
    }
}
