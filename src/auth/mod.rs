pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};

// Re-export necessary items
pub use extractors::CurrentUser;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenCodec, TokenPayload, ACCESS_TOKEN_TTL_SECS, REFRESH_TOKEN_TTL_SECS};

/// Cookie key under which the access token travels.
pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";
/// Cookie key under which the refresh token travels.
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

/// Payload for a signup request.
///
/// At least one of `email` / `phone_number` must be present; the identity
/// service enforces this together with the format rules, so no constraints
/// are declared here.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub password: String,
    pub full_name: String,
    pub nickname: String,
}

/// Payload for a login request. Lookup is by email OR phone number.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub password: String,
}

/// Payload for exchanging a refresh token for a new access token.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// The signed tokens returned by login and refresh.
///
/// `refresh_token` is absent on refresh responses: refreshing issues a new
/// access token only and leaves the stored refresh token in place.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}
