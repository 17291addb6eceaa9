use crate::error::AppError;
use crate::models::{NewUser, User};
use sqlx::PgPool;

const USER_COLUMNS: &str = "id, email, phone_number, password_hash, full_name, nickname, \
     refresh_token, created_at, updated_at, deleted_at";

/// Owns the durable state of user records.
///
/// The identity service holds no state of its own; everything it knows about
/// a user between calls goes through here.
#[derive(Clone)]
pub struct UserDirectory {
    pool: PgPool,
}

impl UserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Finds the first user matching any of the given identifiers (logical OR
    /// across email, phone number, and nickname). Returns `None` when no
    /// identifier is provided at all.
    pub async fn find_by_any_of(
        &self,
        email: Option<&str>,
        phone_number: Option<&str>,
        nickname: Option<&str>,
    ) -> Result<Option<User>, AppError> {
        let mut conditions: Vec<String> = Vec::new();
        let mut param_count = 1;

        if email.is_some() {
            conditions.push(format!("email = ${}", param_count));
            param_count += 1;
        }
        if phone_number.is_some() {
            conditions.push(format!("phone_number = ${}", param_count));
            param_count += 1;
        }
        if nickname.is_some() {
            conditions.push(format!("nickname = ${}", param_count));
        }

        if conditions.is_empty() {
            return Ok(None);
        }

        let sql = format!(
            "SELECT {} FROM users WHERE {} LIMIT 1",
            USER_COLUMNS,
            conditions.join(" OR ")
        );

        let mut query = sqlx::query_as::<_, User>(&sql);
        if let Some(email) = email {
            query = query.bind(email);
        }
        if let Some(phone_number) = phone_number {
            query = query.bind(phone_number);
        }
        if let Some(nickname) = nickname {
            query = query.bind(nickname);
        }

        let user = query.fetch_optional(&self.pool).await?;
        Ok(user)
    }

    /// Persists a new user. The refresh token column starts out null.
    pub async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let sql = format!(
            "INSERT INTO users (email, phone_number, password_hash, full_name, nickname) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {}",
            USER_COLUMNS
        );

        let user = sqlx::query_as::<_, User>(&sql)
            .bind(new_user.email)
            .bind(new_user.phone_number)
            .bind(new_user.password_hash)
            .bind(new_user.full_name)
            .bind(new_user.nickname)
            .fetch_one(&self.pool)
            .await?;
        Ok(user)
    }

    /// Overwrites the user's stored refresh token. The previous value, and any
    /// token matching it, becomes unusable for refresh from this point on.
    pub async fn set_refresh_token(&self, user_id: i32, token: &str) -> Result<User, AppError> {
        let sql = format!(
            "UPDATE users SET refresh_token = $1, updated_at = now() \
             WHERE id = $2 \
             RETURNING {}",
            USER_COLUMNS
        );

        let user = sqlx::query_as::<_, User>(&sql)
            .bind(token)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(user)
    }

    /// Looks up a user requiring an exact match on both the id and the stored
    /// refresh token string. A miss means the token was rotated away or never
    /// issued by us.
    pub async fn find_by_id_and_refresh_token(
        &self,
        user_id: i32,
        token: &str,
    ) -> Result<Option<User>, AppError> {
        let sql = format!(
            "SELECT {} FROM users WHERE id = $1 AND refresh_token = $2",
            USER_COLUMNS
        );

        let user = sqlx::query_as::<_, User>(&sql)
            .bind(user_id)
            .bind(token)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn list_all(&self) -> Result<Vec<User>, AppError> {
        let sql = format!("SELECT {} FROM users ORDER BY id", USER_COLUMNS);

        let users = sqlx::query_as::<_, User>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }
}
