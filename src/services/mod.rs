//! Services organized by domain concern.

pub mod auth_service;
pub mod file_service;
pub mod post_service;
pub mod token_blacklist;
pub mod token_service;
pub mod user_service;

pub use auth_service::AuthService;
pub use file_service::FileService;
pub use post_service::PostService;
pub use token_blacklist::TokenBlacklist;
pub use token_service::TokenService;
pub use user_service::UserService;
