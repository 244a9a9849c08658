//! Input validation beyond what the request models declare.

pub mod common;
pub mod post;
pub mod user;

pub use common::*;
pub use post::*;
pub use user::*;
