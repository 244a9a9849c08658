use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::handlers;
use crate::middleware::AuthMiddleware;
use crate::models::HealthResponse;
use crate::services::TokenService;

pub fn configure_routes(cfg: &mut web::ServiceConfig, tokens: Arc<TokenService>) {
    cfg.service(
        web::scope("/v1")
            // Health check
            .route("/health", web::get().to(health_check))
            // Auth routes (logout needs a token)
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(handlers::register))
                    .route("/login", web::post().to(handlers::login))
                    .service(
                        web::resource("/logout")
                            .wrap(AuthMiddleware::new(Arc::clone(&tokens)))
                            .route(web::post().to(handlers::logout)),
                    ),
            )
            // Post routes (protected)
            .service(
                web::scope("/posts")
                    .wrap(AuthMiddleware::new(Arc::clone(&tokens)))
                    .route("", web::get().to(handlers::get_posts))
                    .route("", web::post().to(handlers::create_post))
                    .route("/{id}", web::delete().to(handlers::delete_post)),
            )
            // User routes (protected)
            .service(
                web::scope("/users")
                    .wrap(AuthMiddleware::new(Arc::clone(&tokens)))
                    .route("", web::get().to(handlers::get_users))
                    .route("/{username}", web::get().to(handlers::get_user_detail)),
            )
            // Stored attachment images (protected)
            .service(
                web::scope("/image")
                    .wrap(AuthMiddleware::new(tokens))
                    .route("/posts/{image}", web::get().to(handlers::get_image)),
            ),
    );
}

/// Check that the server is up
#[utoipa::path(
    get,
    path = "/v1/health",
    tag = "Health",
    responses(
        (status = 200, description = "Server is running", body = HealthResponse)
    )
)]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "OK".to_string(),
        message: "Server is running".to_string(),
    })
}
