//! User directory and profile handlers.

use actix_web::{web, HttpRequest, HttpResponse};
use log::debug;

use crate::errors::ApiError;
use crate::middleware::require_user_id;
use crate::models::UsersResponse;
use crate::services::UserService;

/// List every user
#[utoipa::path(
    get,
    path = "/v1/users",
    tag = "Users",
    responses(
        (status = 200, description = "All users", body = UsersResponse),
        (status = 401, description = "Unauthorized", body = crate::models::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_users(user_service: web::Data<UserService>) -> Result<HttpResponse, ApiError> {
    let users = user_service.get_all_users().await?;

    Ok(HttpResponse::Ok().json(UsersResponse {
        users: users.into_iter().map(Into::into).collect(),
    }))
}

/// Get a user's profile and, when visible, their posts
///
/// Posts of a private account are only listed for the account owner.
#[utoipa::path(
    get,
    path = "/v1/users/{username}",
    tag = "Users",
    params(
        ("username" = String, Path, description = "Username")
    ),
    responses(
        (status = 200, description = "User profile", body = crate::models::UserDetailResponse),
        (status = 401, description = "Unauthorized", body = crate::models::ErrorResponse),
        (status = 404, description = "User not found", body = crate::models::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_user_detail(
    user_service: web::Data<UserService>,
    path: web::Path<String>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let viewer_id = require_user_id(&req)?;
    let username = path.into_inner();
    debug!("User {} viewing profile", viewer_id);

    let detail = user_service.get_user_detail(viewer_id, &username).await?;

    Ok(HttpResponse::Ok().json(detail))
}
