//! Data models organized by type.

pub mod claims;
pub mod post;
pub mod requests;
pub mod responses;
pub mod user;

pub use claims::*;
pub use post::*;
pub use requests::*;
pub use responses::*;
pub use user::*;
