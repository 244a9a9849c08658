//! Application constants module.
//!
//! Centralizes the message strings returned to clients and the pagination defaults.

pub mod errors;
pub mod messages;
pub mod pagination;

pub use errors::*;
pub use messages::*;
pub use pagination::*;
