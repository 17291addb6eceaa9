//!
//! # Identity Service
//!
//! Orchestrates signup validation, uniqueness checks, login, and refresh-token
//! rotation over the credential hasher, the token codec, and the user
//! directory. The service is stateless: every call stands alone, and all
//! durable state lives in the directory.

use lazy_static::lazy_static;
use regex::Regex;

use crate::auth::{
    hash_password, verify_password, SignupRequest, TokenCodec, TokenPair, TokenPayload,
    ACCESS_TOKEN_TTL_SECS, REFRESH_TOKEN_TTL_SECS,
};
use crate::db::UserDirectory;
use crate::error::AppError;
use crate::models::{NewUser, User};

lazy_static! {
    static ref EMAIL_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    // National mobile format: 11 digits starting "010".
    static ref PHONE_REGEX: Regex = Regex::new(r"^010\d{8}$").unwrap();
}

/// Treats an absent or empty string as "not provided".
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Validates signup input. The check order is fixed so error messages are
/// deterministic: nickname, then contact presence, then email format, then
/// phone format.
pub fn validate_signup_input(
    nickname: &str,
    email: Option<&str>,
    phone_number: Option<&str>,
) -> Result<(), AppError> {
    let email = non_empty(email);
    let phone_number = non_empty(phone_number);

    if nickname.is_empty() {
        return Err(AppError::Validation("nickname is required".into()));
    }

    if email.is_none() && phone_number.is_none() {
        return Err(AppError::Validation(
            "email or phone number is required".into(),
        ));
    }

    if let Some(email) = email {
        if !EMAIL_REGEX.is_match(email) {
            return Err(AppError::Validation("invalid email format".into()));
        }
    }

    if let Some(phone_number) = phone_number {
        if !PHONE_REGEX.is_match(phone_number) {
            return Err(AppError::Validation("invalid phone number format".into()));
        }
    }

    Ok(())
}

/// Picks the conflict to report for an existing user colliding with a signup
/// candidate. When several fields collide at once, the most specific one wins:
/// email over phone number over nickname.
fn conflict_for(
    existing: &User,
    email: Option<&str>,
    phone_number: Option<&str>,
    nickname: Option<&str>,
) -> AppError {
    if existing.email.as_deref() == email && email.is_some() {
        return AppError::Conflict("email is already registered".into());
    }
    if existing.phone_number.as_deref() == phone_number && phone_number.is_some() {
        return AppError::Conflict("phone number is already registered".into());
    }
    if Some(existing.nickname.as_str()) == nickname {
        return AppError::Conflict("nickname is already taken".into());
    }
    AppError::Conflict("account already exists".into())
}

#[derive(Clone)]
pub struct IdentityService {
    directory: UserDirectory,
    codec: TokenCodec,
}

impl IdentityService {
    pub fn new(directory: UserDirectory, codec: TokenCodec) -> Self {
        Self { directory, codec }
    }

    /// See [`validate_signup_input`].
    pub fn validate_input(
        &self,
        nickname: &str,
        email: Option<&str>,
        phone_number: Option<&str>,
    ) -> Result<(), AppError> {
        validate_signup_input(nickname, email, phone_number)
    }

    /// Fails with a `Conflict` if any existing user shares the candidate's
    /// email, phone number, or nickname.
    pub async fn check_uniqueness(
        &self,
        email: Option<&str>,
        phone_number: Option<&str>,
        nickname: Option<&str>,
    ) -> Result<(), AppError> {
        let email = non_empty(email);
        let phone_number = non_empty(phone_number);
        let nickname = non_empty(nickname);

        let existing = self
            .directory
            .find_by_any_of(email, phone_number, nickname)
            .await?;

        match existing {
            Some(user) => Err(conflict_for(&user, email, phone_number, nickname)),
            None => Ok(()),
        }
    }

    /// Hashes the password and persists the user with a null refresh token.
    ///
    /// Contract: the route layer calls `validate_input` and `check_uniqueness`
    /// first; signup itself performs no duplicate check.
    pub async fn signup(&self, data: SignupRequest) -> Result<User, AppError> {
        let password_hash = hash_password(&data.password)?;
        let new_user = NewUser {
            email: data.email.filter(|e| !e.is_empty()),
            phone_number: data.phone_number.filter(|p| !p.is_empty()),
            password_hash,
            full_name: data.full_name,
            nickname: data.nickname,
        };
        self.directory.create(new_user).await
    }

    /// Authenticates by (email OR phone number) + password and issues a fresh
    /// token pair.
    ///
    /// The refresh token is persisted on the user record, overwriting any
    /// prior value; that overwrite is the sole revocation mechanism, so a new
    /// login invalidates every previously issued refresh token for the user.
    pub async fn login(
        &self,
        password: &str,
        email: Option<&str>,
        phone_number: Option<&str>,
    ) -> Result<TokenPair, AppError> {
        let user = self
            .directory
            .find_by_any_of(non_empty(email), non_empty(phone_number), None)
            .await?
            .ok_or_else(|| AppError::Auth("user not found".into()))?;

        if !verify_password(password, &user.password_hash) {
            return Err(AppError::Auth("bad credentials".into()));
        }

        let payload = TokenPayload {
            user_id: user.id,
            email: user.email.clone(),
            phone_number: user.phone_number.clone(),
        };

        let access_token = self.codec.issue(&payload, ACCESS_TOKEN_TTL_SECS)?;
        let refresh_token = self.codec.issue(&payload, REFRESH_TOKEN_TTL_SECS)?;

        self.directory
            .set_refresh_token(user.id, &refresh_token)
            .await?;

        Ok(TokenPair {
            access_token,
            refresh_token: Some(refresh_token),
        })
    }

    /// Exchanges a refresh token for a new access token.
    ///
    /// The token must verify AND exactly match the value stored on the user
    /// record; a signature-valid token that was rotated away by a later login
    /// is rejected the same as a forged one. The refresh token itself is not
    /// rotated here.
    pub async fn refresh_access_token(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        let claims = self
            .codec
            .verify(refresh_token)
            .map_err(|_| AppError::Auth("invalid refresh token".into()))?;

        let user = self
            .directory
            .find_by_id_and_refresh_token(claims.sub, refresh_token)
            .await?
            .ok_or_else(|| AppError::Auth("invalid refresh token".into()))?;

        let payload = TokenPayload {
            user_id: user.id,
            email: user.email.clone(),
            phone_number: user.phone_number.clone(),
        };
        let access_token = self.codec.issue(&payload, ACCESS_TOKEN_TTL_SECS)?;

        Ok(TokenPair {
            access_token,
            refresh_token: None,
        })
    }

    /// Unauthenticated bulk read of all users. Kept deliberately outside the
    /// authorization model.
    pub async fn get_all_users(&self) -> Result<Vec<User>, AppError> {
        self.directory.list_all().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn existing_user(email: Option<&str>, phone: Option<&str>, nickname: &str) -> User {
        User {
            id: 1,
            email: email.map(String::from),
            phone_number: phone.map(String::from),
            password_hash: "$2b$10$hash".to_string(),
            full_name: "Alice A".to_string(),
            nickname: nickname.to_string(),
            refresh_token: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: None,
        }
    }

    #[test]
    fn test_validate_accepts_well_formed_input() {
        assert!(validate_signup_input("alice", Some("a@x.com"), None).is_ok());
        assert!(validate_signup_input("alice", None, Some("01012345678")).is_ok());
        assert!(validate_signup_input("alice", Some("a@x.com"), Some("01012345678")).is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_nickname_first() {
        // Nickname is checked before everything else, even when the contact
        // fields are also bad.
        let err = validate_signup_input("", None, Some("not-a-phone")).unwrap_err();
        assert_eq!(err, AppError::Validation("nickname is required".into()));
    }

    #[test]
    fn test_validate_requires_at_least_one_contact() {
        let err = validate_signup_input("alice", None, None).unwrap_err();
        assert_eq!(
            err,
            AppError::Validation("email or phone number is required".into())
        );

        // Empty strings count as absent.
        let err = validate_signup_input("alice", Some(""), Some("")).unwrap_err();
        assert_eq!(
            err,
            AppError::Validation("email or phone number is required".into())
        );
    }

    #[test]
    fn test_validate_checks_email_format_before_phone_format() {
        let err = validate_signup_input("alice", Some("bad-email"), Some("bad-phone")).unwrap_err();
        assert_eq!(err, AppError::Validation("invalid email format".into()));

        let err = validate_signup_input("alice", Some("a@x.com"), Some("bad-phone")).unwrap_err();
        assert_eq!(
            err,
            AppError::Validation("invalid phone number format".into())
        );
    }

    #[test]
    fn test_email_pattern() {
        for good in ["a@x.com", "user.name@sub.domain.org", "a+b@x.co"] {
            assert!(validate_signup_input("n", Some(good), None).is_ok(), "{}", good);
        }
        for bad in ["a@x", "ax.com", "a @x.com", "@x.com", "a@.com "] {
            assert!(validate_signup_input("n", Some(bad), None).is_err(), "{}", bad);
        }
    }

    #[test]
    fn test_phone_pattern() {
        assert!(validate_signup_input("n", None, Some("01012345678")).is_ok());
        for bad in ["0101234567", "010123456789", "01112345678", "010-1234-5678"] {
            assert!(validate_signup_input("n", None, Some(bad)).is_err(), "{}", bad);
        }
    }

    #[test]
    fn test_conflict_priority_email_over_phone_over_nickname() {
        let user = existing_user(Some("a@x.com"), Some("01012345678"), "alice");

        // All three collide: email wins.
        let err = conflict_for(&user, Some("a@x.com"), Some("01012345678"), Some("alice"));
        assert_eq!(err, AppError::Conflict("email is already registered".into()));

        // Phone and nickname collide: phone wins.
        let err = conflict_for(&user, Some("b@x.com"), Some("01012345678"), Some("alice"));
        assert_eq!(
            err,
            AppError::Conflict("phone number is already registered".into())
        );

        // Only nickname collides.
        let err = conflict_for(&user, Some("b@x.com"), Some("01087654321"), Some("alice"));
        assert_eq!(err, AppError::Conflict("nickname is already taken".into()));
    }

    #[test]
    fn test_conflict_ignores_absent_candidate_fields() {
        // The existing user has no email; a candidate who also provided no
        // email must not collide on the shared None.
        let user = existing_user(None, Some("01012345678"), "alice");
        let err = conflict_for(&user, None, None, Some("alice"));
        assert_eq!(err, AppError::Conflict("nickname is already taken".into()));
    }
}
