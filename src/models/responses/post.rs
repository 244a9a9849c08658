//! Post-related response models.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{PostAttachment, PostWithAttachments, PostWithOwner, User};

#[derive(Debug, Serialize, ToSchema)]
pub struct AttachmentResponse {
    #[schema(example = 7)]
    pub id: i64,
    /// Blob key, servable through `/v1/image/{storage_path}`
    #[schema(example = "posts/0b6f3c1e-8c57-4d3c-9e43-53b1f0d6e2a1.png")]
    pub storage_path: String,
}

impl From<PostAttachment> for AttachmentResponse {
    fn from(attachment: PostAttachment) -> Self {
        Self {
            id: attachment.id,
            storage_path: attachment.storage_path,
        }
    }
}

/// Owner summary embedded in each feed post
#[derive(Debug, Serialize, ToSchema)]
pub struct PostOwnerResponse {
    pub id: i64,
    pub full_name: String,
    pub username: String,
    pub bio: String,
    pub is_private: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for PostOwnerResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name,
            username: user.username,
            bio: user.bio,
            is_private: user.is_private,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PostResponse {
    pub id: i64,
    pub caption: String,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub user: PostOwnerResponse,
    pub attachments: Vec<AttachmentResponse>,
}

impl From<PostWithOwner> for PostResponse {
    fn from(item: PostWithOwner) -> Self {
        Self {
            id: item.post.id,
            caption: item.post.caption,
            created_at: item.post.created_at,
            deleted_at: item.post.deleted_at,
            user: item.owner.into(),
            attachments: item.attachments.into_iter().map(Into::into).collect(),
        }
    }
}

/// One page of the post feed
#[derive(Debug, Serialize, ToSchema)]
pub struct PostListResponse {
    #[schema(example = 0)]
    pub page: i64,
    #[schema(example = 10)]
    pub size: i64,
    pub posts: Vec<PostResponse>,
}

/// Post as listed on its owner's profile
#[derive(Debug, Serialize, ToSchema)]
pub struct ProfilePostResponse {
    pub id: i64,
    pub caption: String,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub attachments: Vec<AttachmentResponse>,
}

impl From<PostWithAttachments> for ProfilePostResponse {
    fn from(item: PostWithAttachments) -> Self {
        Self {
            id: item.post.id,
            caption: item.post.caption,
            created_at: item.post.created_at,
            deleted_at: item.post.deleted_at,
            attachments: item.attachments.into_iter().map(Into::into).collect(),
        }
    }
}

/// Stored image as a data URI
#[derive(Debug, Serialize, ToSchema)]
pub struct ImageResponse {
    #[schema(example = "data:image/png;base64,iVBORw0KGgo...")]
    pub base64: String,
}
