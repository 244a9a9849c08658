//! Error message constants used throughout the application.

// Validation summaries
pub const ERR_INVALID_FIELD: &str = "Invalid field";
pub const ERR_VALIDATION: &str = "Validation error";

// Authentication errors
pub const ERR_UNAUTHENTICATED: &str = "Unauthenticated.";
pub const ERR_WRONG_CREDENTIALS: &str = "Wrong username or password";

// Resource errors
pub const ERR_USER_NOT_FOUND: &str = "User not found";
pub const ERR_POST_NOT_FOUND: &str = "Post not found";
pub const ERR_IMAGE_NOT_FOUND: &str = "Image not found.";
pub const ERR_FORBIDDEN_ACCESS: &str = "Forbidden access";

// Internal errors
pub const ERR_INTERNAL: &str = "Internal server error";
pub const ERR_IMAGE_PROCESSING: &str = "An error occurred while processing the image.";
pub const ERR_FAILED_SAVE_FILE: &str = "Failed to save file";

// Field messages
pub const ERR_INVALID_JSON: &str = "The request body must be valid JSON.";
pub const ERR_UNREADABLE_UPLOAD: &str = "The upload could not be read completely.";
pub const ERR_TOO_MANY_ATTACHMENTS: &str = "The attachments field must not have more than 10 items.";
pub const ERR_USERNAME_TAKEN: &str = "The username has already been taken.";
pub const ERR_CAPTION_REQUIRED: &str = "The caption field is required.";
pub const ERR_CAPTION_STRING: &str = "The caption field must be a string.";
pub const ERR_ATTACHMENTS_REQUIRED: &str = "The attachments field is required.";
pub const ERR_PAGE_INTEGER: &str = "The page field must be an integer.";
pub const ERR_PAGE_MIN: &str = "The page field must be at least 0.";
pub const ERR_SIZE_INTEGER: &str = "The size field must be an integer.";
pub const ERR_SIZE_MIN: &str = "The size field must be at least 1.";
pub const ERR_ATTACHMENT_FILE: &str = "must be a file.";
pub const ERR_ATTACHMENT_TYPE: &str = "must be a file of type: jpg, jpeg, webp, png, gif.";
pub const ERR_ATTACHMENT_SIZE: &str = "must not be greater than 2048 kilobytes.";
