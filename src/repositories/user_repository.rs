//! User repository for all PostgreSQL operations related to users.

use async_trait::async_trait;
use log::debug;
use sqlx::PgPool;

use crate::errors::ApiError;
use crate::models::{NewUser, User};

/// Persistence operations on the `users` table.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user; a taken username surfaces as a validation error.
    async fn insert(&self, user: NewUser) -> Result<User, ApiError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, ApiError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ApiError>;

    /// Every user, oldest account first.
    async fn list(&self) -> Result<Vec<User>, ApiError>;
}

/// PostgreSQL-backed user repository.
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn insert(&self, user: NewUser) -> Result<User, ApiError> {
        let created = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (full_name, bio, username, password, is_private)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, full_name, bio, username, password, is_private, created_at, updated_at
            "#,
        )
        .bind(&user.full_name)
        .bind(&user.bio)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.is_private)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, ApiError> {
        debug!("Repository: Finding user by ID: {}", id);
        Ok(sqlx::query_as::<_, User>(
            r#"
            SELECT id, full_name, bio, username, password, is_private, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ApiError> {
        Ok(sqlx::query_as::<_, User>(
            r#"
            SELECT id, full_name, bio, username, password, is_private, created_at, updated_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn list(&self) -> Result<Vec<User>, ApiError> {
        Ok(sqlx::query_as::<_, User>(
            r#"
            SELECT id, full_name, bio, username, password, is_private, created_at, updated_at
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?)
    }
}
