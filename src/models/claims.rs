//! JWT Claims model.

use serde::{Deserialize, Serialize};

use crate::constants::ERR_UNAUTHENTICATED;
use crate::errors::ApiError;

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // user id
    pub username: String,
    pub jti: String, // unique per issued token, used for revocation
    pub exp: usize,
    pub iat: usize,
}

impl Claims {
    /// Numeric id of the user the token was issued to.
    pub fn user_id(&self) -> Result<i64, ApiError> {
        self.sub
            .parse()
            .map_err(|_| ApiError::Unauthorized(ERR_UNAUTHENTICATED.to_string()))
    }
}
