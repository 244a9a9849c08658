use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Row of the `users` table.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub full_name: String,
    pub bio: String,
    pub username: String,
    /// bcrypt hash; never serialized into a response.
    pub password: String,
    pub is_private: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated registration data ready to be persisted.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub full_name: String,
    pub bio: String,
    pub username: String,
    pub password_hash: String,
    pub is_private: bool,
}
