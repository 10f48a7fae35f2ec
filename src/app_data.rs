use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::{AppSettings, SecretManager};
use crate::errors::InternalError;
use crate::providers::{
    AuthenticationProvider, AuthorizationProvider, CaptchaVerifier, CryptoProvider,
    DisabledCaptcha, EmailSender, LogEmailSender, OtpProvider, RecaptchaVerifier, TokenProvider,
};

/// Providers created once at startup and shared by every coordinator
pub struct Providers {
    pub crypto_provider: Arc<CryptoProvider>,
    pub token_provider: Arc<TokenProvider>,
    pub authentication_provider: Arc<AuthenticationProvider>,
    pub authorization_provider: Arc<AuthorizationProvider>,
    pub otp_provider: Arc<OtpProvider>,
    pub email_sender: Arc<dyn EmailSender>,
    pub captcha_verifier: Arc<dyn CaptchaVerifier>,
}

/// Centralized application data
///
/// Built once in main.rs from the immutable settings and secrets, wrapped in
/// `Arc` and handed to the API layer, which creates coordinators from it.
///
/// ```text
/// main.rs
///   ↓ AppSettings + SecretManager (fatal on bad config)
/// AppData::init()
///   ├─ db (DatabaseConnection)
///   ├─ settings / secret_manager
///   └─ providers (crypto, token, authentication, authorization, otp, email, captcha)
///   ↓ Arc<AppData>
///   └─ XxxCoordinator::new(app_data)
/// ```
pub struct AppData {
    pub db: DatabaseConnection,
    pub settings: Arc<AppSettings>,
    pub secret_manager: Arc<SecretManager>,
    pub providers: Providers,
}

impl AppData {
    /// Initialize application data with the default collaborators
    ///
    /// Mail is logged rather than delivered; CAPTCHA uses reCAPTCHA only when
    /// enabled in settings.
    ///
    /// # Errors
    ///
    /// Returns `InternalError` when the hashing work factor is invalid
    pub fn init(
        db: DatabaseConnection,
        settings: AppSettings,
        secret_manager: SecretManager,
    ) -> Result<Self, InternalError> {
        let email_sender: Arc<dyn EmailSender> =
            Arc::new(LogEmailSender::new(settings.email_from()));

        let captcha_verifier: Arc<dyn CaptchaVerifier> =
            match (settings.captcha_enabled(), secret_manager.recaptcha_secret()) {
                (true, Some(secret)) => Arc::new(RecaptchaVerifier::new(secret)),
                _ => Arc::new(DisabledCaptcha),
            };

        Self::with_collaborators(db, settings, secret_manager, email_sender, captcha_verifier)
    }

    /// Initialize application data with explicit mail and CAPTCHA collaborators
    pub fn with_collaborators(
        db: DatabaseConnection,
        settings: AppSettings,
        secret_manager: SecretManager,
        email_sender: Arc<dyn EmailSender>,
        captcha_verifier: Arc<dyn CaptchaVerifier>,
    ) -> Result<Self, InternalError> {
        tracing::debug!("Initializing AppData...");

        let settings = Arc::new(settings);
        let secret_manager = Arc::new(secret_manager);

        let crypto_provider = Arc::new(CryptoProvider::new(
            secret_manager.clone(),
            settings.hashing(),
        )?);
        let token_provider = Arc::new(TokenProvider::new(secret_manager.clone()));
        let authentication_provider = Arc::new(AuthenticationProvider::new(
            token_provider.clone(),
            crypto_provider.clone(),
        ));
        let otp_provider = Arc::new(OtpProvider::new(crypto_provider.clone()));

        tracing::debug!("AppData initialization complete");

        Ok(Self {
            db,
            settings,
            secret_manager,
            providers: Providers {
                crypto_provider,
                token_provider,
                authentication_provider,
                authorization_provider: Arc::new(AuthorizationProvider::new()),
                otp_provider,
                email_sender,
                captcha_verifier,
            },
        })
    }
}
