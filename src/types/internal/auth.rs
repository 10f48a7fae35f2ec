use serde::{Deserialize, Serialize};

/// Claims carried by the signed inner session token
///
/// There is no `exp` claim: a session stays valid until the admin user is
/// deleted or the token key is rotated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Admin user id
    pub id: String,

    /// Admin user email at issue time
    pub email: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,
}
