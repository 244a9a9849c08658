//! Request models for API endpoints.

pub mod auth;
pub mod post;

pub use auth::*;
pub use post::*;

use serde::{Deserialize, Deserializer};

/// Trim a string field and treat blank input as absent.
pub(crate) fn trimmed<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty()))
}

/// Treat an empty string as absent without trimming (passwords keep their spaces).
pub(crate) fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|v| !v.is_empty()))
}
