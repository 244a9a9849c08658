//! Success message constants used throughout the application.

// Authentication messages
pub const MSG_REGISTER_SUCCESS: &str = "Register success";
pub const MSG_LOGIN_SUCCESS: &str = "Login success";
pub const MSG_LOGOUT_SUCCESS: &str = "Logout success";

// Post messages
pub const MSG_CREATE_POST_SUCCESS: &str = "Create post success";
