//! Bearer token issuance, verification and revocation.

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use log::debug;
use uuid::Uuid;

use crate::constants::ERR_UNAUTHENTICATED;
use crate::errors::ApiError;
use crate::models::{Claims, User};
use crate::services::TokenBlacklist;
use crate::utils::mask_username;

/// Clock skew tolerated when checking `exp`.
const EXPIRY_LEEWAY_SECS: u64 = 60;

/// Resolves bearer tokens to the user they were issued to.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expiration_hours: i64,
    blacklist: TokenBlacklist,
}

impl TokenService {
    pub fn new(secret: &str, expiration_hours: i64) -> Self {
        let mut validation = Validation::default();
        validation.leeway = EXPIRY_LEEWAY_SECS;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            expiration_hours,
            blacklist: TokenBlacklist::new(),
        }
    }

    /// Issue a new token bound to `user`.
    pub fn issue(&self, user: &User) -> Result<String, ApiError> {
        let now = Utc::now().timestamp() as usize;
        let exp = now + (self.expiration_hours.max(0) as usize * 3600);

        let claims = Claims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            jti: Uuid::new_v4().to_string(),
            exp,
            iat: now,
        };

        debug!("Issued token for user {}", mask_username(&user.username));

        Ok(encode(&Header::default(), &claims, &self.encoding_key)?)
    }

    /// Verify signature, expiry and revocation status of a token.
    pub fn verify(&self, token: &str) -> Result<Claims, ApiError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|_| ApiError::Unauthorized(ERR_UNAUTHENTICATED.to_string()))?
            .claims;

        if self.blacklist.is_revoked(&claims.jti) {
            return Err(ApiError::Unauthorized(ERR_UNAUTHENTICATED.to_string()));
        }

        Ok(claims)
    }

    /// Revoke the token the claims were decoded from.
    ///
    /// The entry outlives `exp` by the leeway, since `verify` still accepts
    /// the token during that window.
    pub async fn revoke(&self, claims: &Claims) {
        let until = claims.exp + self.validation.leeway as usize;
        self.blacklist.revoke(&claims.jti, until).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: 42,
            full_name: "Jane Doe".to_string(),
            bio: "bio".to_string(),
            username: "jane".to_string(),
            password: "hash".to_string(),
            is_private: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_issued_token_verifies_to_user() {
        let tokens = TokenService::new("secret", 1);
        let token = tokens.issue(&user()).unwrap();

        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.user_id().unwrap(), 42);
        assert_eq!(claims.username, "jane");
    }

    #[test]
    fn test_each_token_is_distinct() {
        let tokens = TokenService::new("secret", 1);
        let a = tokens.verify(&tokens.issue(&user()).unwrap()).unwrap();
        let b = tokens.verify(&tokens.issue(&user()).unwrap()).unwrap();
        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn test_foreign_signature_is_rejected() {
        let issuer = TokenService::new("secret", 1);
        let verifier = TokenService::new("other-secret", 1);
        let token = issuer.issue(&user()).unwrap();

        assert!(matches!(
            verifier.verify(&token),
            Err(ApiError::Unauthorized(_))
        ));
        assert!(issuer.verify("not-a-token").is_err());
    }

    #[actix_web::test]
    async fn test_revocation_only_affects_that_token() {
        let tokens = TokenService::new("secret", 1);
        let first = tokens.issue(&user()).unwrap();
        let second = tokens.issue(&user()).unwrap();

        let claims = tokens.verify(&first).unwrap();
        tokens.revoke(&claims).await;

        assert!(tokens.verify(&first).is_err());
        assert!(tokens.verify(&second).is_ok());
    }

    #[actix_web::test]
    async fn test_revocation_covers_expiry_leeway() {
        // exp == iat, so the token is only accepted inside the leeway window
        let tokens = TokenService::new("secret", 0);
        let token = tokens.issue(&user()).unwrap();

        let claims = tokens.verify(&token).unwrap();
        tokens.revoke(&claims).await;

        assert!(matches!(
            tokens.verify(&token),
            Err(ApiError::Unauthorized(_))
        ));
    }
}
