mod config;
mod constants;
mod errors;
mod handlers;
mod middleware;
mod models;
mod openapi;
mod repositories;
mod routes;
mod services;
mod state;
mod utils;
mod validators;

use std::sync::Arc;

use actix_web::{middleware::Logger, App, HttpServer};
use log::info;
use sqlx::postgres::PgPoolOptions;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::CONFIG;
use crate::openapi::ApiDoc;
use crate::repositories::{PgPostRepository, PgUserRepository};
use crate::services::{FileService, TokenService};
use crate::state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize environment variables and logger
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // Connect to PostgreSQL
    info!("Connecting to PostgreSQL...");
    let pool = PgPoolOptions::new()
        .max_connections(CONFIG.database_max_connections)
        .connect(&CONFIG.database_url)
        .await
        .expect("Failed to connect to PostgreSQL");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");
    info!("Connected to PostgreSQL and applied migrations");

    // Initialize services
    let files = FileService::new(&CONFIG.storage_dir);
    tokio::fs::create_dir_all(files.root()).await?;

    let state = AppState::new(
        Arc::new(PgUserRepository::new(pool.clone())),
        Arc::new(PgPostRepository::new(pool)),
        files,
        Arc::new(TokenService::new(
            &CONFIG.jwt_secret,
            CONFIG.jwt_expiration_hours,
        )),
        CONFIG.bcrypt_cost,
    );

    // Start HTTP server
    let server_addr = format!("{}:{}", CONFIG.server_host, CONFIG.server_port);
    info!("Starting server at http://{}", server_addr);
    info!("Swagger UI available at http://{}/swagger-ui/", server_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
            .configure(|cfg| state.configure(cfg))
    })
    .bind(&server_addr)?
    .run()
    .await
}
