//! Post request models.

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::constants::FIRST_PAGE_SPAN;

/// Raw query string of `GET /posts`; parsed by `validators::parse_page_query`.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct PostListQuery {
    /// Page number, starting at 0 (default: 0)
    #[param(value_type = Option<i64>, minimum = 0)]
    pub page: Option<String>,
    /// Posts per page (default: 10)
    #[param(value_type = Option<i64>, minimum = 1)]
    pub size: Option<String>,
}

/// Validated pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub size: i64,
}

impl PageRequest {
    /// Number of posts to skip.
    ///
    /// Page 0 starts at the top; every later page `n` starts at
    /// `(n - 1) * size + 10`, so page 1 always begins at the eleventh post.
    pub fn offset(&self) -> i64 {
        if self.page == 0 {
            0
        } else {
            (self.page - 1)
                .saturating_mul(self.size)
                .saturating_add(FIRST_PAGE_SPAN)
        }
    }
}

/// One uploaded multipart file before validation.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
    /// Set when the part was larger than the accepted size and was truncated.
    pub oversized: bool,
}

/// Fields collected from the multipart body of `POST /posts`.
#[derive(Debug, Default)]
pub struct CreatePostForm {
    pub caption: Option<String>,
    /// Set when `caption` arrived as a file part or was not UTF-8 text.
    pub caption_not_text: bool,
    pub attachments: Vec<UploadedFile>,
}

/// Multipart body of `POST /posts`, for the API documentation only.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct CreatePostRequest {
    /// Post caption
    #[schema(example = "Sunset at the pier")]
    pub caption: String,
    /// One or more images (jpg, jpeg, webp, png, gif; max 2 MB each)
    #[schema(value_type = Vec<String>)]
    pub attachments: Vec<Vec<u8>>,
}
