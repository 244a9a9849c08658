//! Post repository for posts and their attachments.
//!
//! Soft-deleted rows (`deleted_at IS NOT NULL`) are invisible to every read.

use std::collections::HashMap;

use async_trait::async_trait;
use log::{debug, warn};
use sqlx::PgPool;

use crate::errors::ApiError;
use crate::models::{Post, PostAttachment, PostWithAttachments, PostWithOwner, User};

/// Persistence operations on the `posts` and `post_attachments` tables.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Insert a post and one attachment row per storage path, all or nothing.
    async fn create_with_attachments(
        &self,
        user_id: i64,
        caption: &str,
        storage_paths: &[String],
    ) -> Result<Post, ApiError>;

    /// Find a post that has not been soft-deleted.
    async fn find_live(&self, id: i64) -> Result<Option<Post>, ApiError>;

    async fn live_attachments(&self, post_id: i64) -> Result<Vec<PostAttachment>, ApiError>;

    async fn soft_delete_attachment(&self, id: i64) -> Result<(), ApiError>;

    async fn soft_delete(&self, id: i64) -> Result<(), ApiError>;

    /// Newest live posts first, with owner and attachments.
    async fn feed(&self, offset: i64, limit: i64) -> Result<Vec<PostWithOwner>, ApiError>;

    /// Newest live posts of one user first, with attachments.
    async fn by_user(&self, user_id: i64) -> Result<Vec<PostWithAttachments>, ApiError>;
}

/// PostgreSQL-backed post repository.
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Live attachments of the given posts, grouped by post id in insertion order.
    async fn attachments_by_post(
        &self,
        post_ids: &[i64],
    ) -> Result<HashMap<i64, Vec<PostAttachment>>, ApiError> {
        if post_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, PostAttachment>(
            r#"
            SELECT id, post_id, storage_path, deleted_at
            FROM post_attachments
            WHERE post_id = ANY($1) AND deleted_at IS NULL
            ORDER BY id
            "#,
        )
        .bind(post_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<i64, Vec<PostAttachment>> = HashMap::new();
        for row in rows {
            grouped.entry(row.post_id).or_default().push(row);
        }
        Ok(grouped)
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    async fn create_with_attachments(
        &self,
        user_id: i64,
        caption: &str,
        storage_paths: &[String],
    ) -> Result<Post, ApiError> {
        let mut tx = self.pool.begin().await?;

        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (user_id, caption)
            VALUES ($1, $2)
            RETURNING id, user_id, caption, created_at, deleted_at
            "#,
        )
        .bind(user_id)
        .bind(caption)
        .fetch_one(&mut *tx)
        .await?;

        for path in storage_paths {
            sqlx::query("INSERT INTO post_attachments (post_id, storage_path) VALUES ($1, $2)")
                .bind(post.id)
                .bind(path)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        debug!(
            "Repository: Created post {} with {} attachments",
            post.id,
            storage_paths.len()
        );
        Ok(post)
    }

    async fn find_live(&self, id: i64) -> Result<Option<Post>, ApiError> {
        Ok(sqlx::query_as::<_, Post>(
            r#"
            SELECT id, user_id, caption, created_at, deleted_at
            FROM posts
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn live_attachments(&self, post_id: i64) -> Result<Vec<PostAttachment>, ApiError> {
        Ok(self
            .attachments_by_post(&[post_id])
            .await?
            .remove(&post_id)
            .unwrap_or_default())
    }

    async fn soft_delete_attachment(&self, id: i64) -> Result<(), ApiError> {
        sqlx::query(
            "UPDATE post_attachments SET deleted_at = NOW(), updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn soft_delete(&self, id: i64) -> Result<(), ApiError> {
        sqlx::query("UPDATE posts SET deleted_at = NOW(), updated_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn feed(&self, offset: i64, limit: i64) -> Result<Vec<PostWithOwner>, ApiError> {
        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, user_id, caption, created_at, deleted_at
            FROM posts
            WHERE deleted_at IS NULL
            ORDER BY created_at DESC, id DESC
            OFFSET $1
            LIMIT $2
            "#,
        )
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        let post_ids: Vec<i64> = posts.iter().map(|p| p.id).collect();
        let mut owner_ids: Vec<i64> = posts.iter().map(|p| p.user_id).collect();
        owner_ids.sort_unstable();
        owner_ids.dedup();

        let owners: HashMap<i64, User> = sqlx::query_as::<_, User>(
            r#"
            SELECT id, full_name, bio, username, password, is_private, created_at, updated_at
            FROM users
            WHERE id = ANY($1)
            "#,
        )
        .bind(&owner_ids)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();

        let mut attachments = self.attachments_by_post(&post_ids).await?;

        Ok(posts
            .into_iter()
            .filter_map(|post| {
                let owner = match owners.get(&post.user_id) {
                    Some(owner) => owner.clone(),
                    None => {
                        warn!("Post {} has no owner row, skipping", post.id);
                        return None;
                    }
                };
                let attachments = attachments.remove(&post.id).unwrap_or_default();
                Some(PostWithOwner {
                    post,
                    owner,
                    attachments,
                })
            })
            .collect())
    }

    async fn by_user(&self, user_id: i64) -> Result<Vec<PostWithAttachments>, ApiError> {
        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, user_id, caption, created_at, deleted_at
            FROM posts
            WHERE user_id = $1 AND deleted_at IS NULL
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let post_ids: Vec<i64> = posts.iter().map(|p| p.id).collect();
        let mut attachments = self.attachments_by_post(&post_ids).await?;

        Ok(posts
            .into_iter()
            .map(|post| {
                let attachments = attachments.remove(&post.id).unwrap_or_default();
                PostWithAttachments { post, attachments }
            })
            .collect())
    }
}
