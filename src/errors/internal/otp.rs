use thiserror::Error;

#[derive(Error, Debug)]
pub enum OtpError {
    #[error("OTP already redeemed")]
    AlreadyRedeemed,

    #[error("OTP expired")]
    Expired,

    #[error("OTP does not match")]
    Mismatch,

    /// Verification attempted for a user that was never sent a code
    #[error("No OTP issued for admin user {admin_user_id}")]
    NoChallenge { admin_user_id: String },
}
