use thiserror::Error;

/// Failures of outbound collaborators (email, CAPTCHA)
#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("Email delivery failed to {recipient}")]
    EmailFailed { recipient: String },

    #[error("Captcha verification rejected")]
    CaptchaRejected,

    #[error("Captcha service error: {0}")]
    CaptchaUnavailable(String),
}
