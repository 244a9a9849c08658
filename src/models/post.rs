use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::models::User;

/// Row of the `posts` table.
#[derive(Debug, Clone, FromRow)]
pub struct Post {
    pub id: i64,
    pub user_id: i64,
    pub caption: String,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Post {
    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.user_id == user_id
    }
}

/// Row of the `post_attachments` table.
#[derive(Debug, Clone, FromRow)]
pub struct PostAttachment {
    pub id: i64,
    pub post_id: i64,
    pub storage_path: String,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// A live post with its owner and live attachments, as shown in the feed.
#[derive(Debug, Clone)]
pub struct PostWithOwner {
    pub post: Post,
    pub owner: User,
    pub attachments: Vec<PostAttachment>,
}

/// A live post with its live attachments, as shown on a profile.
#[derive(Debug, Clone)]
pub struct PostWithAttachments {
    pub post: Post,
    pub attachments: Vec<PostAttachment>,
}
