//! Response models for API endpoints.

pub mod api;
pub mod post;
pub mod user;

pub use api::*;
pub use post::*;
pub use user::*;
