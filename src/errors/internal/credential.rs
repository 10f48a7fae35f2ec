use thiserror::Error;

#[derive(Error, Debug)]
pub enum CredentialError {
    /// Unknown email, deleted account or wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Incorrect old password")]
    IncorrectPassword,

    #[error("Password and confirm password do not match")]
    PasswordMismatch,

    #[error("Email not registered: {0}")]
    EmailNotRegistered(String),

    #[error("Admin user already exists: {0}")]
    DuplicateEmail(String),

    #[error("Email already in use: {0}")]
    EmailTaken(String),

    #[error("Admin user not found: {0}")]
    AdminUserNotFound(String),

    #[error("Password hashing failed: {0}")]
    PasswordHashingFailed(String),
}
