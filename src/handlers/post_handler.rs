//! Post handlers: publish, delete, feed, and attachment images.

use actix_multipart::{Field, Multipart};
use actix_web::{web, HttpMessage, HttpRequest, HttpResponse};
use futures::StreamExt;
use log::{debug, warn};

use crate::constants::{
    ERR_INVALID_FIELD, ERR_TOO_MANY_ATTACHMENTS, ERR_UNREADABLE_UPLOAD, MSG_CREATE_POST_SUCCESS,
};
use crate::errors::ApiError;
use crate::middleware::require_user_id;
use crate::models::{
    CreatePostForm, ImageResponse, MessageResponse, PostListQuery, PostListResponse, UploadedFile,
};
use crate::services::PostService;
use crate::validators::{
    parse_page_query, validate_create_post, MAX_ATTACHMENTS, MAX_ATTACHMENT_SIZE,
};

/// Publish a post with one or more image attachments
#[utoipa::path(
    post,
    path = "/v1/posts",
    tag = "Posts",
    request_body(content = crate::models::CreatePostRequest, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Post created", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = crate::models::ErrorResponse),
        (status = 422, description = "Validation error", body = crate::models::ErrorResponse),
        (status = 500, description = "Failed to store attachments", body = crate::models::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_post(
    post_service: web::Data<PostService>,
    payload: Multipart,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let user_id = require_user_id(&req)?;

    // Anything but multipart carries neither field; validation reports both.
    let form = if is_multipart(&req) {
        read_post_form(payload).await?
    } else {
        CreatePostForm::default()
    };
    let post = validate_create_post(form)?;

    post_service.create(user_id, post).await?;

    Ok(HttpResponse::Created().json(MessageResponse::new(MSG_CREATE_POST_SUCCESS)))
}

/// Delete one of your own posts
#[utoipa::path(
    delete,
    path = "/v1/posts/{id}",
    tag = "Posts",
    params(
        ("id" = i64, Path, description = "Post ID")
    ),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 401, description = "Unauthorized", body = crate::models::ErrorResponse),
        (status = 403, description = "Post belongs to another user", body = crate::models::ErrorResponse),
        (status = 404, description = "Post not found", body = crate::models::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_post(
    post_service: web::Data<PostService>,
    path: web::Path<i64>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let user_id = require_user_id(&req)?;

    post_service.delete(user_id, path.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Get one page of the feed, newest first
///
/// Page 0 holds the first `size` posts; page `n >= 1` starts after
/// `(n - 1) * size + 10` posts.
#[utoipa::path(
    get,
    path = "/v1/posts",
    tag = "Posts",
    params(PostListQuery),
    responses(
        (status = 200, description = "Feed page", body = PostListResponse),
        (status = 401, description = "Unauthorized", body = crate::models::ErrorResponse),
        (status = 422, description = "Invalid page or size", body = crate::models::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_posts(
    post_service: web::Data<PostService>,
    query: web::Query<PostListQuery>,
) -> Result<HttpResponse, ApiError> {
    let page = parse_page_query(&query)?;
    debug!("Fetching feed page {} (size {})", page.page, page.size);

    let posts = post_service.list(page).await?;

    Ok(HttpResponse::Ok().json(PostListResponse {
        page: page.page,
        size: page.size,
        posts: posts.into_iter().map(Into::into).collect(),
    }))
}

/// Get a stored attachment image as a base64 data URI
#[utoipa::path(
    get,
    path = "/v1/image/posts/{image}",
    tag = "Posts",
    params(
        ("image" = String, Path, description = "Stored image file name")
    ),
    responses(
        (status = 200, description = "Image data", body = ImageResponse),
        (status = 401, description = "Unauthorized", body = crate::models::ErrorResponse),
        (status = 404, description = "Image not found", body = crate::models::ErrorResponse),
        (status = 500, description = "Image could not be read", body = crate::models::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_image(
    post_service: web::Data<PostService>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let base64 = post_service.image_data_uri(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ImageResponse { base64 }))
}

/// Collect the `caption` and `attachments` parts of a multipart body.
///
/// A body that breaks off midway is rejected as a whole, as is one carrying
/// more than `MAX_ATTACHMENTS` files. Parts with other names are drained
/// without being buffered.
async fn read_post_form(mut payload: Multipart) -> Result<CreatePostForm, ApiError> {
    let mut form = CreatePostForm::default();

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| {
            warn!("Failed to read multipart body: {}", e);
            unreadable_upload()
        })?;

        let (name, file_name) = match field.content_disposition() {
            Some(cd) => (
                cd.get_name().unwrap_or_default().to_string(),
                cd.get_filename().map(str::to_string),
            ),
            None => continue,
        };

        let is_attachment = is_attachment_field(&name);
        if name != "caption" && !is_attachment {
            while let Some(chunk) = field.next().await {
                chunk.map_err(|e| {
                    warn!("Failed to read multipart field '{}': {}", name, e);
                    unreadable_upload()
                })?;
            }
            continue;
        }

        if is_attachment && form.attachments.len() == MAX_ATTACHMENTS {
            warn!("Rejected upload with more than {} attachments", MAX_ATTACHMENTS);
            return Err(ApiError::field(
                ERR_INVALID_FIELD,
                "attachments",
                ERR_TOO_MANY_ATTACHMENTS,
            ));
        }

        let (bytes, oversized) = read_field(&mut field, MAX_ATTACHMENT_SIZE)
            .await
            .map_err(|e| {
                warn!("Failed to read multipart field '{}': {}", name, e);
                unreadable_upload()
            })?;

        if name == "caption" {
            if file_name.is_some() {
                form.caption_not_text = true;
                continue;
            }
            match String::from_utf8(bytes) {
                Ok(text) => {
                    let text = text.trim();
                    form.caption = (!text.is_empty()).then(|| text.to_string());
                }
                Err(_) => form.caption_not_text = true,
            }
        } else {
            form.attachments.push(UploadedFile {
                file_name,
                bytes,
                oversized,
            });
        }
    }

    Ok(form)
}

fn unreadable_upload() -> ApiError {
    ApiError::field(ERR_INVALID_FIELD, "attachments", ERR_UNREADABLE_UPLOAD)
}

fn is_multipart(req: &HttpRequest) -> bool {
    req.content_type()
        .to_ascii_lowercase()
        .starts_with("multipart/form-data")
}

/// `attachments`, `attachments[]` and `attachments[<n>]` all name the attachment list.
fn is_attachment_field(name: &str) -> bool {
    match name.strip_prefix("attachments") {
        Some("") | Some("[]") => true,
        Some(rest) => rest
            .strip_prefix('[')
            .and_then(|r| r.strip_suffix(']'))
            .map(|index| !index.is_empty() && index.bytes().all(|b| b.is_ascii_digit()))
            .unwrap_or(false),
        None => false,
    }
}

/// Read a part, keeping at most `limit + 1` bytes.
///
/// Returns the bytes and whether the part exceeded `limit`; the remainder of
/// an oversized part is drained so the next part can be read.
async fn read_field(
    field: &mut Field,
    limit: usize,
) -> Result<(Vec<u8>, bool), actix_multipart::MultipartError> {
    let mut bytes = Vec::new();
    let mut oversized = false;

    while let Some(chunk) = field.next().await {
        let chunk = chunk?;
        if oversized {
            continue;
        }
        let room = limit + 1 - bytes.len();
        if chunk.len() > room {
            bytes.extend_from_slice(&chunk[..room]);
            oversized = true;
        } else {
            bytes.extend_from_slice(&chunk);
            oversized = bytes.len() > limit;
        }
    }

    Ok((bytes, oversized))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attachment_field_names() {
        assert!(is_attachment_field("attachments"));
        assert!(is_attachment_field("attachments[]"));
        assert!(is_attachment_field("attachments[0]"));
        assert!(is_attachment_field("attachments[12]"));

        assert!(!is_attachment_field("attachment"));
        assert!(!is_attachment_field("attachments[x]"));
        assert!(!is_attachment_field("attachments[0"));
        assert!(!is_attachment_field("caption"));
    }
}
