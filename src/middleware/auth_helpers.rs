//! Authentication helper functions for handlers behind `AuthMiddleware`.

use actix_web::HttpRequest;
use log::warn;

use crate::constants::ERR_UNAUTHENTICATED;
use crate::errors::ApiError;
use crate::models::Claims;

use super::RequestExt;

/// Extract claims from request or return Unauthorized error.
///
/// Use this at the start of any handler that requires authentication.
///
/// # Example
/// ```ignore
/// let claims = require_auth(&req)?;
/// ```
pub fn require_auth(req: &HttpRequest) -> Result<Claims, ApiError> {
    req.get_claims().ok_or_else(|| {
        warn!("Failed to get claims from request");
        ApiError::Unauthorized(ERR_UNAUTHENTICATED.to_string())
    })
}

/// Id of the authenticated user.
pub fn require_user_id(req: &HttpRequest) -> Result<i64, ApiError> {
    require_auth(req)?.user_id()
}
