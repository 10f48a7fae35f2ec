// Providers layer - business logic
//
// Providers hold the rules (hashing, tokens, OTP, RBAC) and the outbound
// collaborators. Coordinators compose them per endpoint.

pub mod authentication_provider;
pub mod authorization_provider;
pub mod captcha_provider;
pub mod crypto_provider;
pub mod email_provider;
pub mod otp_provider;
pub mod token_provider;

pub use authentication_provider::AuthenticationProvider;
pub use authorization_provider::AuthorizationProvider;
pub use captcha_provider::{CaptchaVerifier, DisabledCaptcha, RecaptchaVerifier};
pub use crypto_provider::CryptoProvider;
pub use email_provider::{EmailSender, LogEmailSender, MemoryEmailSender};
pub use otp_provider::OtpProvider;
pub use token_provider::TokenProvider;
