use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A user account as stored in the database.
///
/// At least one of `email` / `phone_number` is present; nickname, email, and
/// phone number are each globally unique where present. `refresh_token` holds
/// the single active refresh token for the account: issuing a new one on login
/// overwrites it, which is the sole revocation mechanism. The credential and
/// session fields never leave the process through serialization.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub full_name: String,
    pub nickname: String,
    #[serde(skip_serializing)]
    pub refresh_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Fields required to persist a new user. The refresh token starts out null.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub password_hash: String,
    pub full_name: String,
    pub nickname: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_are_not_serialized() {
        let user = User {
            id: 1,
            email: Some("a@x.com".to_string()),
            phone_number: None,
            password_hash: "$2b$10$secret".to_string(),
            full_name: "Alice A".to_string(),
            nickname: "alice".to_string(),
            refresh_token: Some("some.signed.token".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: None,
        };

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert!(json.get("refresh_token").is_none());
        assert_eq!(json["nickname"], "alice");
        assert_eq!(json["email"], "a@x.com");
    }
}
