//! User-related validation rules.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Letters, digits, dots and underscores.
    pub static ref USERNAME_REGEX: Regex =
        Regex::new(r"^[a-zA-Z0-9._]+$").expect("username pattern is valid");
}
