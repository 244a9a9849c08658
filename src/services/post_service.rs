//! Post service for publishing, deleting and listing posts and serving their images.

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use log::{error, info, warn};

use crate::constants::{
    ERR_FAILED_SAVE_FILE, ERR_FORBIDDEN_ACCESS, ERR_IMAGE_NOT_FOUND, ERR_IMAGE_PROCESSING,
    ERR_POST_NOT_FOUND,
};
use crate::errors::ApiError;
use crate::models::{PageRequest, Post, PostWithOwner};
use crate::repositories::PostRepository;
use crate::services::FileService;
use crate::validators::{image_mime_type, ValidatedPost};

/// Blob namespace holding post attachments.
pub const POSTS_NAMESPACE: &str = "posts";

pub struct PostService {
    posts: Arc<dyn PostRepository>,
    files: FileService,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostRepository>, files: FileService) -> Self {
        Self { posts, files }
    }

    /// Store every attachment and persist the post.
    ///
    /// All or nothing: if any blob or the database write fails, blobs stored so
    /// far are removed and no post row remains.
    pub async fn create(&self, user_id: i64, post: ValidatedPost) -> Result<Post, ApiError> {
        let mut stored: Vec<String> = Vec::with_capacity(post.images.len());

        for image in &post.images {
            match self
                .files
                .store(POSTS_NAMESPACE, image.extension(), &image.bytes)
                .await
            {
                Ok(key) => stored.push(key),
                Err(e) => {
                    error!("Failed to store attachment for user {}: {}", user_id, e);
                    self.discard_blobs(&stored).await;
                    return Err(ApiError::Internal(ERR_FAILED_SAVE_FILE.to_string()));
                }
            }
        }

        match self
            .posts
            .create_with_attachments(user_id, &post.caption, &stored)
            .await
        {
            Ok(created) => {
                info!(
                    "User {} created post {} with {} attachments",
                    user_id,
                    created.id,
                    stored.len()
                );
                Ok(created)
            }
            Err(e) => {
                self.discard_blobs(&stored).await;
                Err(e)
            }
        }
    }

    /// Soft-delete a post owned by `user_id`, removing its attachment blobs and rows.
    pub async fn delete(&self, user_id: i64, post_id: i64) -> Result<(), ApiError> {
        let post = self.posts.find_live(post_id).await?.ok_or_else(|| {
            warn!("Delete failed: post {} not found", post_id);
            ApiError::NotFound(ERR_POST_NOT_FOUND.to_string())
        })?;

        if !post.is_owned_by(user_id) {
            warn!(
                "User {} attempted to delete post {} owned by {}",
                user_id, post.id, post.user_id
            );
            return Err(ApiError::Forbidden(ERR_FORBIDDEN_ACCESS.to_string()));
        }

        for attachment in self.posts.live_attachments(post.id).await? {
            if self.files.exists(&attachment.storage_path).await {
                self.files.delete(&attachment.storage_path).await?;
            }
            self.posts.soft_delete_attachment(attachment.id).await?;
        }
        self.posts.soft_delete(post.id).await?;

        info!("User {} deleted post {}", user_id, post.id);
        Ok(())
    }

    /// One page of the feed, newest first.
    pub async fn list(&self, page: PageRequest) -> Result<Vec<PostWithOwner>, ApiError> {
        self.posts.feed(page.offset(), page.size).await
    }

    /// An attachment image as a `data:` URI.
    pub async fn image_data_uri(&self, image_name: &str) -> Result<String, ApiError> {
        let key = format!("{}/{}", POSTS_NAMESPACE, image_name);

        let bytes = match self.files.read(&key).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return Err(ApiError::NotFound(ERR_IMAGE_NOT_FOUND.to_string())),
            Err(e) => {
                error!("Failed to read image {}: {}", key, e);
                return Err(ApiError::Internal(ERR_IMAGE_PROCESSING.to_string()));
            }
        };

        let mime_type = image::guess_format(&bytes)
            .map(image_mime_type)
            .unwrap_or("application/octet-stream");

        Ok(format!("data:{};base64,{}", mime_type, STANDARD.encode(&bytes)))
    }

    async fn discard_blobs(&self, keys: &[String]) {
        for key in keys {
            if let Err(e) = self.files.delete(key).await {
                error!("Failed to remove orphaned blob {}: {}", key, e);
            }
        }
    }
}
