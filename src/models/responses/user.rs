//! User-related response models.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{ProfilePostResponse, User};

/// Public account fields returned alongside a freshly issued token
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthUserResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Jane Doe")]
    pub full_name: String,
    #[schema(example = "Coffee and film cameras")]
    pub bio: String,
    #[schema(example = "jane.doe")]
    pub username: String,
    #[schema(example = false)]
    pub is_private: bool,
}

impl From<User> for AuthUserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name,
            bio: user.bio,
            username: user.username,
            is_private: user.is_private,
        }
    }
}

/// Response for successful registration or login
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    #[schema(example = "Login success")]
    pub message: String,
    /// Bearer token for the `Authorization` header
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
    pub user: AuthUserResponse,
}

/// Entry of the user directory
#[derive(Debug, Serialize, ToSchema)]
pub struct UserSummaryResponse {
    pub id: i64,
    pub full_name: String,
    pub username: String,
    pub bio: String,
    pub is_private: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserSummaryResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name,
            username: user.username,
            bio: user.bio,
            is_private: user.is_private,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UsersResponse {
    pub users: Vec<UserSummaryResponse>,
}

/// A user's profile as seen by the requester
#[derive(Debug, Serialize, ToSchema)]
pub struct UserDetailResponse {
    pub id: i64,
    pub full_name: String,
    pub username: String,
    pub bio: String,
    pub is_private: bool,
    pub created_at: DateTime<Utc>,
    /// Whether the requester is looking at their own account
    pub is_your_account: bool,
    /// Number of posts in `posts`; 0 when the account is hidden
    pub posts_count: usize,
    pub posts: Vec<ProfilePostResponse>,
}
