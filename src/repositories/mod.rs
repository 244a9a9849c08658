//! Repository layer for database operations.
//!
//! Services depend on the repository traits rather than on a concrete database,
//! so the HTTP layer can be exercised against the in-memory implementation in tests.

#[cfg(test)]
pub mod memory;
pub mod post_repository;
pub mod user_repository;

pub use post_repository::{PgPostRepository, PostRepository};
pub use user_repository::{PgUserRepository, UserRepository};
