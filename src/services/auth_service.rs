//! Authentication service for registration, login and logout.

use std::sync::Arc;

use bcrypt::{hash, verify};
use log::{debug, info, warn};

use crate::constants::{
    ERR_INVALID_FIELD, ERR_UNAUTHENTICATED, ERR_USERNAME_TAKEN, ERR_WRONG_CREDENTIALS,
};
use crate::errors::ApiError;
use crate::models::{Claims, LoginRequest, NewUser, RegisterRequest, User};
use crate::repositories::UserRepository;
use crate::services::TokenService;
use crate::utils::mask_username;

/// Service for authentication operations.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    tokens: Arc<TokenService>,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, tokens: Arc<TokenService>, bcrypt_cost: u32) -> Self {
        Self {
            users,
            tokens,
            bcrypt_cost,
        }
    }

    /// Create an account from a validated request and issue its first token.
    pub async fn register(&self, req: RegisterRequest) -> Result<(User, String), ApiError> {
        let username = req.username.unwrap_or_default();

        if self.users.find_by_username(&username).await?.is_some() {
            debug!("Registration rejected, {} is taken", mask_username(&username));
            return Err(ApiError::field(
                ERR_INVALID_FIELD,
                "username",
                ERR_USERNAME_TAKEN,
            ));
        }

        let password_hash = hash_password(&req.password.unwrap_or_default(), self.bcrypt_cost)?;

        let user = self
            .users
            .insert(NewUser {
                full_name: req.full_name.unwrap_or_default(),
                bio: req.bio.unwrap_or_default(),
                username,
                password_hash,
                is_private: req.is_private,
            })
            .await?;

        let token = self.tokens.issue(&user)?;
        info!("Registered user {} ({})", user.id, mask_username(&user.username));

        Ok((user, token))
    }

    /// Authenticate a user and issue a new token.
    pub async fn login(&self, req: &LoginRequest) -> Result<(User, String), ApiError> {
        let (username, password) = req.credentials();

        let user = self.check_credentials(username, password).await?.ok_or_else(|| {
            warn!("Failed login attempt for {}", mask_username(username));
            ApiError::Unauthorized(ERR_WRONG_CREDENTIALS.to_string())
        })?;

        let token = self.tokens.issue(&user)?;
        info!("User {} logged in", mask_username(&user.username));

        Ok((user, token))
    }

    /// Revoke the presenting token after re-checking the submitted credentials.
    ///
    /// The credentials are checked on their own; they are not required to belong
    /// to the token's user.
    pub async fn logout(&self, claims: &Claims, req: &LoginRequest) -> Result<(), ApiError> {
        let (username, password) = req.credentials();

        if self.check_credentials(username, password).await?.is_none() {
            warn!("Logout rejected, bad credentials for {}", mask_username(username));
            return Err(ApiError::Unauthorized(ERR_UNAUTHENTICATED.to_string()));
        }

        let token_user = self.users.find_by_id(claims.user_id()?).await?.ok_or_else(|| {
            warn!("Logout rejected, token user {} no longer resolves", claims.sub);
            ApiError::Unauthorized(ERR_UNAUTHENTICATED.to_string())
        })?;

        self.tokens.revoke(claims).await;
        info!("User {} logged out", mask_username(&token_user.username));

        Ok(())
    }

    /// The user owning `username` if `password` matches its hash.
    async fn check_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, ApiError> {
        match self.users.find_by_username(username).await? {
            Some(user) if verify_password(password, &user.password)? => Ok(Some(user)),
            _ => Ok(None),
        }
    }
}

/// Hash a password using bcrypt.
pub fn hash_password(password: &str, cost: u32) -> Result<String, ApiError> {
    Ok(hash(password, cost)?)
}

/// Verify a password against a bcrypt hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, ApiError> {
    Ok(verify(password, hash)?)
}
