//! User service for the user directory and profiles.

use std::sync::Arc;

use log::{debug, warn};

use crate::constants::ERR_USER_NOT_FOUND;
use crate::errors::ApiError;
use crate::models::{User, UserDetailResponse};
use crate::repositories::{PostRepository, UserRepository};
use crate::utils::mask_username;

pub struct UserService {
    users: Arc<dyn UserRepository>,
    posts: Arc<dyn PostRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>, posts: Arc<dyn PostRepository>) -> Self {
        Self { users, posts }
    }

    pub async fn get_all_users(&self) -> Result<Vec<User>, ApiError> {
        self.users.list().await
    }

    /// Profile of `username` as seen by `viewer_id`.
    ///
    /// Posts of a private account are only listed for its owner.
    pub async fn get_user_detail(
        &self,
        viewer_id: i64,
        username: &str,
    ) -> Result<UserDetailResponse, ApiError> {
        let user = self.users.find_by_username(username).await?.ok_or_else(|| {
            warn!("User not found with username: {}", mask_username(username));
            ApiError::NotFound(ERR_USER_NOT_FOUND.to_string())
        })?;

        let is_your_account = viewer_id == user.id;
        let posts = if !user.is_private || is_your_account {
            self.posts
                .by_user(user.id)
                .await?
                .into_iter()
                .map(Into::into)
                .collect()
        } else {
            debug!("Hiding posts of private user {} from {}", user.id, viewer_id);
            Vec::new()
        };

        Ok(UserDetailResponse {
            id: user.id,
            full_name: user.full_name,
            username: user.username,
            bio: user.bio,
            is_private: user.is_private,
            created_at: user.created_at,
            is_your_account,
            posts_count: posts.len(),
            posts,
        })
    }
}
