//! In-memory repository used by the HTTP tests.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{Duration, Utc};

use crate::constants::{ERR_INVALID_FIELD, ERR_USERNAME_TAKEN};
use crate::errors::ApiError;
use crate::models::{NewUser, Post, PostAttachment, PostWithAttachments, PostWithOwner, User};

use super::{PostRepository, UserRepository};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    posts: Vec<Post>,
    attachments: Vec<PostAttachment>,
    ticks: i64,
}

impl Tables {
    /// Strictly increasing timestamps so creation order is observable.
    fn now(&mut self) -> chrono::DateTime<Utc> {
        self.ticks += 1;
        Utc::now() + Duration::milliseconds(self.ticks)
    }

    fn live_attachments(&self, post_id: i64) -> Vec<PostAttachment> {
        self.attachments
            .iter()
            .filter(|a| a.post_id == post_id && a.deleted_at.is_none())
            .cloned()
            .collect()
    }

    fn live_posts_newest_first(&self) -> Vec<Post> {
        let mut posts: Vec<Post> = self
            .posts
            .iter()
            .filter(|p| !p.is_deleted())
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        posts
    }
}

/// Shared tables implementing both repository traits.
#[derive(Clone, Default)]
pub struct MemoryRepository {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().expect("memory repository lock poisoned")
    }

    /// Every attachment row, including soft-deleted ones.
    pub fn all_attachments(&self) -> Vec<PostAttachment> {
        self.lock().attachments.clone()
    }

    /// Every post row, including soft-deleted ones.
    pub fn all_posts(&self) -> Vec<Post> {
        self.lock().posts.clone()
    }
}

#[async_trait]
impl UserRepository for MemoryRepository {
    async fn insert(&self, user: NewUser) -> Result<User, ApiError> {
        let mut tables = self.lock();
        if tables.users.iter().any(|u| u.username == user.username) {
            return Err(ApiError::field(
                ERR_INVALID_FIELD,
                "username",
                ERR_USERNAME_TAKEN,
            ));
        }

        let now = tables.now();
        let created = User {
            id: tables.users.len() as i64 + 1,
            full_name: user.full_name,
            bio: user.bio,
            username: user.username,
            password: user.password_hash,
            is_private: user.is_private,
            created_at: now,
            updated_at: now,
        };
        tables.users.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, ApiError> {
        Ok(self.lock().users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ApiError> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<User>, ApiError> {
        Ok(self.lock().users.clone())
    }
}

#[async_trait]
impl PostRepository for MemoryRepository {
    async fn create_with_attachments(
        &self,
        user_id: i64,
        caption: &str,
        storage_paths: &[String],
    ) -> Result<Post, ApiError> {
        let mut tables = self.lock();
        let now = tables.now();
        let post = Post {
            id: tables.posts.len() as i64 + 1,
            user_id,
            caption: caption.to_string(),
            created_at: now,
            deleted_at: None,
        };
        tables.posts.push(post.clone());

        for path in storage_paths {
            let attachment = PostAttachment {
                id: tables.attachments.len() as i64 + 1,
                post_id: post.id,
                storage_path: path.clone(),
                deleted_at: None,
            };
            tables.attachments.push(attachment);
        }

        Ok(post)
    }

    async fn find_live(&self, id: i64) -> Result<Option<Post>, ApiError> {
        Ok(self
            .lock()
            .posts
            .iter()
            .find(|p| p.id == id && !p.is_deleted())
            .cloned())
    }

    async fn live_attachments(&self, post_id: i64) -> Result<Vec<PostAttachment>, ApiError> {
        Ok(self.lock().live_attachments(post_id))
    }

    async fn soft_delete_attachment(&self, id: i64) -> Result<(), ApiError> {
        let mut tables = self.lock();
        let now = tables.now();
        if let Some(attachment) = tables.attachments.iter_mut().find(|a| a.id == id) {
            attachment.deleted_at = Some(now);
        }
        Ok(())
    }

    async fn soft_delete(&self, id: i64) -> Result<(), ApiError> {
        let mut tables = self.lock();
        let now = tables.now();
        if let Some(post) = tables.posts.iter_mut().find(|p| p.id == id) {
            post.deleted_at = Some(now);
        }
        Ok(())
    }

    async fn feed(&self, offset: i64, limit: i64) -> Result<Vec<PostWithOwner>, ApiError> {
        let tables = self.lock();
        Ok(tables
            .live_posts_newest_first()
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .filter_map(|post| {
                let owner = tables.users.iter().find(|u| u.id == post.user_id)?.clone();
                let attachments = tables.live_attachments(post.id);
                Some(PostWithOwner {
                    post,
                    owner,
                    attachments,
                })
            })
            .collect())
    }

    async fn by_user(&self, user_id: i64) -> Result<Vec<PostWithAttachments>, ApiError> {
        let tables = self.lock();
        Ok(tables
            .live_posts_newest_first()
            .into_iter()
            .filter(|p| p.user_id == user_id)
            .map(|post| {
                let attachments = tables.live_attachments(post.id);
                PostWithAttachments { post, attachments }
            })
            .collect())
    }
}
