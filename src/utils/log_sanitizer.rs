//! Log sanitization utilities for masking sensitive data.
//!
//! Usernames are masked before logging so logs don't double as a user directory.

/// Mask a username for safe logging.
///
/// Shows only the first 3 characters followed by asterisks.
///
/// # Examples
/// ```ignore
/// assert_eq!(mask_username("johndoe"), "joh***");
/// assert_eq!(mask_username("ab"), "ab***");
/// ```
pub fn mask_username(username: &str) -> String {
    let visible: String = username.chars().take(3).collect();
    format!("{}***", visible)
}
