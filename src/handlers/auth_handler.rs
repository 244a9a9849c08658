//! Authentication handlers for user registration, login, and logout.

use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::constants::{
    ERR_INVALID_FIELD, ERR_VALIDATION, MSG_LOGIN_SUCCESS, MSG_LOGOUT_SUCCESS, MSG_REGISTER_SUCCESS,
};
use crate::errors::ApiError;
use crate::middleware::require_auth;
use crate::models::{AuthResponse, LoginRequest, MessageResponse, RegisterRequest};
use crate::services::AuthService;
use crate::validators::validation_errors_to_api_error;

/// Register a new account and receive a token
#[utoipa::path(
    post,
    path = "/v1/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 422, description = "Validation error or username taken", body = crate::models::ErrorResponse)
    )
)]
pub async fn register(
    auth_service: web::Data<AuthService>,
    body: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()
        .map_err(|e| validation_errors_to_api_error(ERR_INVALID_FIELD, e))?;

    let (user, token) = auth_service.register(body.into_inner()).await?;

    Ok(HttpResponse::Created().json(AuthResponse {
        message: MSG_REGISTER_SUCCESS.to_string(),
        token,
        user: user.into(),
    }))
}

/// Log in with username and password and receive a token
#[utoipa::path(
    post,
    path = "/v1/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Wrong username or password", body = crate::models::ErrorResponse),
        (status = 422, description = "Validation error", body = crate::models::ErrorResponse)
    )
)]
pub async fn login(
    auth_service: web::Data<AuthService>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()
        .map_err(|e| validation_errors_to_api_error(ERR_VALIDATION, e))?;

    let (user, token) = auth_service.login(&body).await?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        message: MSG_LOGIN_SUCCESS.to_string(),
        token,
        user: user.into(),
    }))
}

/// Log out, revoking the token used for this request
///
/// The username and password must be submitted again; only the presenting
/// token is revoked, other tokens of the account stay valid.
#[utoipa::path(
    post,
    path = "/v1/auth/logout",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logout successful", body = MessageResponse),
        (status = 401, description = "Missing token or wrong credentials", body = crate::models::ErrorResponse),
        (status = 422, description = "Validation error", body = crate::models::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn logout(
    auth_service: web::Data<AuthService>,
    body: web::Json<LoginRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let claims = require_auth(&req)?;

    body.validate()
        .map_err(|e| validation_errors_to_api_error(ERR_VALIDATION, e))?;

    auth_service.logout(&claims, &body).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new(MSG_LOGOUT_SUCCESS)))
}
