use std::collections::BTreeMap;

use actix_web::error::JsonPayloadError;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use log::{error, warn};
use thiserror::Error;

use crate::constants::{
    ERR_INTERNAL, ERR_INVALID_FIELD, ERR_INVALID_JSON, ERR_UNAUTHENTICATED, ERR_USERNAME_TAKEN,
};
use crate::models::ErrorResponse;

/// Field name mapped to every message reported for it.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation Error: {message}: {errors:?}")]
    Validation { message: String, errors: FieldErrors },
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Not Found: {0}")]
    NotFound(String),
    #[error("Internal Server Error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Build a validation error carrying a single field message.
    pub fn field(message: &str, field: &str, field_message: &str) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.to_string(), vec![field_message.to_string()]);
        ApiError::Validation {
            message: message.to_string(),
            errors,
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::Validation { message, errors } => ErrorResponse {
                message: message.clone(),
                errors: Some(errors.clone()),
            },
            ApiError::Unauthorized(message)
            | ApiError::Forbidden(message)
            | ApiError::NotFound(message)
            | ApiError::Internal(message) => ErrorResponse {
                message: message.clone(),
                errors: None,
            },
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() && db_err.constraint() == Some("users_username_key") {
                return ApiError::field(ERR_INVALID_FIELD, "username", ERR_USERNAME_TAKEN);
            }
        }
        error!("Database error: {}", err);
        ApiError::Internal(ERR_INTERNAL.to_string())
    }
}

impl From<bcrypt::BcryptError> for ApiError {
    fn from(err: bcrypt::BcryptError) -> Self {
        error!("Password hashing error: {}", err);
        ApiError::Internal(ERR_INTERNAL.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for ApiError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            jsonwebtoken::errors::ErrorKind::InvalidKeyFormat
            | jsonwebtoken::errors::ErrorKind::Crypto(_) => {
                error!("Token signing error: {}", err);
                ApiError::Internal(ERR_INTERNAL.to_string())
            }
            _ => ApiError::Unauthorized(ERR_UNAUTHENTICATED.to_string()),
        }
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        error!("Storage error: {}", err);
        ApiError::Internal(ERR_INTERNAL.to_string())
    }
}

/// Map malformed JSON bodies to a 422 instead of actix's default 400.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    warn!("Rejected JSON payload: {}", err);
    ApiError::field(ERR_INVALID_FIELD, "body", ERR_INVALID_JSON).into()
}
