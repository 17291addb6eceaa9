//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! Every service-level failure maps to exactly one variant with a stable,
//! human-readable message; the transport layer renders it as
//! `{"status": "error", "message": "..."}` with the matching HTTP status code.
//!
//! `AppError` implements `actix_web::error::ResponseError` so handlers can
//! return `Result<_, AppError>` directly. `From` implementations for
//! `sqlx::Error`, `jsonwebtoken::errors::Error`, and `bcrypt::BcryptError`
//! allow conversion with the `?` operator.

use actix_web::{error::ResponseError, HttpResponse};
use serde_json::json;
use std::fmt;

/// Represents all possible errors that can occur within the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Malformed or missing input (HTTP 422). Always client-caused.
    Validation(String),
    /// A uniqueness violation on signup (HTTP 409). The message names the
    /// colliding field.
    Conflict(String),
    /// Bad credentials, missing/invalid/expired token, or unauthorized access
    /// (HTTP 401). Deliberately uniform so callers cannot tell which check
    /// failed.
    Auth(String),
    /// Resource absent or not owned by the requester (HTTP 404). The two cases
    /// share one message so task existence is not leaked across users.
    NotFound(String),
    /// Missing or invalid startup configuration (HTTP 500). Fatal at process
    /// start; the server must not come up without it.
    Config(String),
    /// An error originating from the persistence layer (HTTP 500). Opaque to
    /// clients; never retried by the core.
    Database(String),
    /// Any other unexpected server-side failure (HTTP 500).
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Validation Error: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Auth(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Config(msg) => write!(f, "Configuration Error: {}", msg),
            AppError::Database(msg) => write!(f, "Database Error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

impl AppError {
    /// The message carried by the error, without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            AppError::Validation(msg)
            | AppError::Conflict(msg)
            | AppError::Auth(msg)
            | AppError::NotFound(msg)
            | AppError::Config(msg)
            | AppError::Database(msg)
            | AppError::Internal(msg) => msg,
        }
    }
}

/// Converts `AppError` variants into `HttpResponse` objects.
///
/// This lets Actix Web translate `AppError` results from handlers into the
/// correct HTTP status codes and the error response shape.
impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let body = json!({
            "status": "error",
            "message": self.message(),
        });
        match self {
            AppError::Validation(_) => HttpResponse::UnprocessableEntity().json(body),
            AppError::Conflict(_) => HttpResponse::Conflict().json(body),
            AppError::Auth(_) => HttpResponse::Unauthorized().json(body),
            AppError::NotFound(_) => HttpResponse::NotFound().json(body),
            AppError::Config(_) | AppError::Database(_) | AppError::Internal(_) => {
                HttpResponse::InternalServerError().json(body)
            }
        }
    }
}

/// Persistence failures propagate unchanged as an opaque internal error.
/// `RowNotFound` is mapped to `NotFound` for the handful of queries that
/// expect a row to exist.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("record not found".into()),
            _ => AppError::Database(error.to_string()),
        }
    }
}

/// JWT processing failures (signature, expiry, malformed payload) all fold
/// into the single `Auth` kind.
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(_: jsonwebtoken::errors::Error) -> AppError {
        AppError::Auth("invalid token".into())
    }
}

/// Hashing failures are server-side; verification mismatches never reach this
/// path (see `auth::password::verify_password`).
impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::Internal(format!("password hashing failed: {}", error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_responses() {
        let error = AppError::Validation("nickname is required".into());
        assert_eq!(error.error_response().status(), 422);

        let error = AppError::Conflict("email is already registered".into());
        assert_eq!(error.error_response().status(), 409);

        let error = AppError::Auth("invalid token".into());
        assert_eq!(error.error_response().status(), 401);

        let error = AppError::NotFound("task not found or not owned by user".into());
        assert_eq!(error.error_response().status(), 404);

        let error = AppError::Config("JWT_SECRET must be set".into());
        assert_eq!(error.error_response().status(), 500);

        let error = AppError::Database("connection refused".into());
        assert_eq!(error.error_response().status(), 500);
    }

    #[test]
    fn test_message_strips_kind_prefix() {
        let error = AppError::Auth("bad credentials".into());
        assert_eq!(error.message(), "bad credentials");
        assert_eq!(error.to_string(), "Unauthorized: bad credentials");
    }

    #[test]
    fn test_jwt_errors_fold_into_one_auth_kind() {
        let expired =
            jsonwebtoken::errors::Error::from(jsonwebtoken::errors::ErrorKind::ExpiredSignature);
        let bad_sig =
            jsonwebtoken::errors::Error::from(jsonwebtoken::errors::ErrorKind::InvalidSignature);
        assert_eq!(AppError::from(expired), AppError::Auth("invalid token".into()));
        assert_eq!(AppError::from(bad_sig), AppError::Auth("invalid token".into()));
    }
}
