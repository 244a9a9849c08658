//! Wiring of repositories and services into the application.

use std::sync::Arc;

use actix_web::web;

use crate::errors::json_error_handler;
use crate::repositories::{PostRepository, UserRepository};
use crate::routes;
use crate::services::{AuthService, FileService, PostService, TokenService, UserService};

/// Shared services handed to every worker.
#[derive(Clone)]
pub struct AppState {
    auth_service: web::Data<AuthService>,
    post_service: web::Data<PostService>,
    user_service: web::Data<UserService>,
    tokens: Arc<TokenService>,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserRepository>,
        posts: Arc<dyn PostRepository>,
        files: FileService,
        tokens: Arc<TokenService>,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            auth_service: web::Data::new(AuthService::new(
                Arc::clone(&users),
                Arc::clone(&tokens),
                bcrypt_cost,
            )),
            post_service: web::Data::new(PostService::new(Arc::clone(&posts), files)),
            user_service: web::Data::new(UserService::new(users, posts)),
            tokens,
        }
    }

    /// Register the services, the JSON error handler, and every `/v1` route.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.auth_service.clone())
            .app_data(self.post_service.clone())
            .app_data(self.user_service.clone())
            .app_data(web::JsonConfig::default().error_handler(json_error_handler));

        routes::configure_routes(cfg, Arc::clone(&self.tokens));
    }
}
