//! Authentication request models.

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use super::{non_empty, trimmed};
use crate::validators::USERNAME_REGEX;

/// Request payload for user registration
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// Display name (max 255 characters)
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(
        required(message = "The full name field is required."),
        length(max = 255, message = "The full name field must not be greater than 255 characters.")
    )]
    #[schema(value_type = String, example = "Jane Doe")]
    pub full_name: Option<String>,
    /// Short biography (max 100 characters)
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(
        required(message = "The bio field is required."),
        length(max = 100, message = "The bio field must not be greater than 100 characters.")
    )]
    #[schema(value_type = String, example = "Coffee and film cameras")]
    pub bio: Option<String>,
    /// Unique username (3-100 characters, letters, numbers, dots and underscores only)
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(
        required(message = "The username field is required."),
        length(
            min = 3,
            max = 100,
            message = "The username field must be between 3 and 100 characters."
        ),
        regex(path = *USERNAME_REGEX, message = "The username field format is invalid.")
    )]
    #[schema(value_type = String, example = "jane.doe")]
    pub username: Option<String>,
    /// Password (6-100 characters)
    #[serde(default, deserialize_with = "non_empty")]
    #[validate(
        required(message = "The password field is required."),
        length(
            min = 6,
            max = 100,
            message = "The password field must be between 6 and 100 characters."
        )
    )]
    #[schema(value_type = String, example = "secret123")]
    pub password: Option<String>,
    /// Whether only the owner may see this account's posts
    #[serde(default)]
    #[schema(example = false)]
    pub is_private: bool,
}

/// Request payload for login, and for the credential re-check on logout
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(required(message = "The username field is required."))]
    #[schema(value_type = String, example = "jane.doe")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    #[validate(
        required(message = "The password field is required."),
        length(min = 6, message = "The password field must be at least 6 characters.")
    )]
    #[schema(value_type = String, example = "secret123")]
    pub password: Option<String>,
}

impl LoginRequest {
    /// Username and password once validation has passed.
    pub fn credentials(&self) -> (&str, &str) {
        (
            self.username.as_deref().unwrap_or_default(),
            self.password.as_deref().unwrap_or_default(),
        )
    }
}
