use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::models::{
    AttachmentResponse, AuthResponse, AuthUserResponse, CreatePostRequest, ErrorResponse,
    HealthResponse, ImageResponse, LoginRequest, MessageResponse, PostListResponse,
    PostOwnerResponse, PostResponse, ProfilePostResponse, RegisterRequest, UserDetailResponse,
    UserSummaryResponse, UsersResponse,
};

/// OpenAPI documentation for the social media API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Social Media API",
        version = "1.0.0",
        description = "REST API for accounts, image posts, a paginated feed, and user profiles with private accounts.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Authentication", description = "Account endpoints (register, login, logout)"),
        (name = "Posts", description = "Post publishing, deletion, feed, and attachment images"),
        (name = "Users", description = "User directory and profiles")
    ),
    paths(
        crate::routes::health_check,
        crate::handlers::register,
        crate::handlers::login,
        crate::handlers::logout,
        crate::handlers::create_post,
        crate::handlers::delete_post,
        crate::handlers::get_posts,
        crate::handlers::get_image,
        crate::handlers::get_users,
        crate::handlers::get_user_detail
    ),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            CreatePostRequest,
            AuthUserResponse,
            AuthResponse,
            MessageResponse,
            AttachmentResponse,
            PostOwnerResponse,
            PostResponse,
            PostListResponse,
            ProfilePostResponse,
            ImageResponse,
            UserSummaryResponse,
            UsersResponse,
            UserDetailResponse,
            ErrorResponse,
            HealthResponse
        )
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Bearer token security scheme
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token returned by /v1/auth/register or /v1/auth/login"))
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for path in [
            "/v1/health",
            "/v1/auth/register",
            "/v1/auth/login",
            "/v1/auth/logout",
            "/v1/posts",
            "/v1/posts/{id}",
            "/v1/image/posts/{image}",
            "/v1/users",
            "/v1/users/{username}",
        ] {
            assert!(paths.contains(&path), "missing {}", path);
        }
    }
}
