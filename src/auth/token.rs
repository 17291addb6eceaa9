use crate::error::AppError;
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Lifetime of an access token: one hour.
pub const ACCESS_TOKEN_TTL_SECS: i64 = 60 * 60;
/// Lifetime of a refresh token: seven days.
pub const REFRESH_TOKEN_TTL_SECS: i64 = 7 * 24 * 60 * 60;

/// The identity a token carries, as supplied by the identity service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPayload {
    pub user_id: i32,
    pub email: Option<String>,
    pub phone_number: Option<String>,
}

/// Claims encoded within a JWT: the payload plus issued-at and expiry.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject of the token, the user's unique identifier.
    pub sub: i32,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    pub fn payload(&self) -> TokenPayload {
        TokenPayload {
            user_id: self.sub,
            email: self.email.clone(),
            phone_number: self.phone_number.clone(),
        }
    }
}

/// Signs and verifies tokens with a process-wide secret.
///
/// The codec is built once at startup from `Config`; a missing secret is a
/// `Config` error caught there, not a per-call failure. Access and refresh
/// tokens differ only in the TTL the caller supplies.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenCodec {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Signs `payload` into a compact token expiring `ttl_secs` from now.
    pub fn issue(&self, payload: &TokenPayload, ttl_secs: i64) -> Result<String, AppError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: payload.user_id,
            email: payload.email.clone(),
            phone_number: payload.phone_number.clone(),
            iat: now,
            exp: now + ttl_secs,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("failed to sign token: {}", e)))
    }

    /// Checks signature integrity and expiry, returning the decoded claims.
    ///
    /// Malformed tokens, bad signatures, and elapsed expiry all surface as the
    /// same `Auth` error; the distinction is not exposed to callers.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(AppError::from)
    }
}
