//! JWT issuing for the mock login and registration endpoints
//!
//! Tokens are HS256-signed and carry the user profile plus `iat`/`exp`.
//! Nothing in the server requires a token; they exist so the dashboard
//! client has something realistic to store.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// Profile embedded in issued tokens and returned by the auth endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
}

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(flatten)]
    pub user: AuthUser,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    pub fn new(user: AuthUser, ttl_seconds: i64) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            user,
            iat: now,
            exp: now + ttl_seconds,
        }
    }
}

/// Signs and verifies tokens with a shared secret
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    /// Token lifetime in seconds
    pub token_ttl: i64,
}

impl TokenIssuer {
    pub const MIN_SECRET_LEN: usize = 32;

    pub fn new(secret: &str, token_ttl: i64) -> Result<Self, AuthError> {
        if secret.len() < Self::MIN_SECRET_LEN {
            return Err(AuthError::InvalidSecret(format!(
                "JWT_SECRET must be at least {} characters",
                Self::MIN_SECRET_LEN
            )));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_ttl,
        })
    }

    /// Sign a token for `user`
    pub fn issue(&self, user: &AuthUser) -> Result<String, AuthError> {
        let claims = Claims::new(user.clone(), self.token_ttl);
        Ok(encode(&Header::default(), &claims, &self.encoding_key)?)
    }

    /// Verify signature and expiry, returning the claims
    pub fn validate_token(&self, token: &str) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &Validation::default())?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-that-is-at-least-32-characters-long";

    fn alice() -> AuthUser {
        AuthUser {
            id: "user-1".to_string(),
            name: "Alice Johnson".to_string(),
            email: "alice@example.com".to_string(),
            role: "admin".to_string(),
        }
    }

    #[test]
    fn test_issue_and_validate() {
        let issuer = TokenIssuer::new(SECRET, 3600).unwrap();
        let token = issuer.issue(&alice()).unwrap();

        let claims = issuer.validate_token(&token).unwrap();
        assert_eq!(claims.user, alice());
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_short_secret_rejected() {
        let result = TokenIssuer::new("short", 3600);
        assert!(matches!(result, Err(AuthError::InvalidSecret(_))));
    }

    #[test]
    fn test_wrong_secret_fails_validation() {
        let issuer = TokenIssuer::new(SECRET, 3600).unwrap();
        let other = TokenIssuer::new("a-completely-different-secret-of-enough-length", 3600)
            .unwrap();
        let token = issuer.issue(&alice()).unwrap();

        assert!(matches!(other.validate_token(&token), Err(AuthError::Token(_))));
    }

    #[test]
    fn test_expired_token() {
        // Well past the default validation leeway
        let issuer = TokenIssuer::new(SECRET, -3600).unwrap();
        let token = issuer.issue(&alice()).unwrap();

        match issuer.validate_token(&token) {
            Err(AuthError::Token(e)) => assert_eq!(
                e.kind(),
                &jsonwebtoken::errors::ErrorKind::ExpiredSignature
            ),
            other => panic!("expected expired signature, got {:?}", other.map(|c| c.exp)),
        }
    }
}
