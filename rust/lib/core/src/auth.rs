//! Session identity for request handlers.
//!
//! Handlers never decode credentials themselves. They ask an
//! [`IdentityProvider`] who is calling; the concrete provider is injected
//! at startup. [`JwtService`] is the production provider: it verifies an
//! HS256 bearer token whose `sub` claim is the internal user id.

use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};

use crate::ServiceError;

/// The resolved caller of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Internal user id.
    pub user_id: String,
    /// Display name carried by the session.
    pub name: String,
}

/// Pluggable session resolver.
pub trait IdentityProvider: Send + Sync + 'static {
    /// Resolve the caller from request headers.
    ///
    /// Returns `ServiceError::Unauthorized` when no valid session exists.
    fn identify(&self, headers: &HeaderMap) -> Result<Identity, ServiceError>;
}

/// JWT claims carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: internal user id.
    pub sub: String,
    /// Display name.
    pub name: String,
    /// Issued at (unix timestamp).
    pub iat: i64,
    /// Expiration (unix timestamp).
    pub exp: i64,
}

/// Issues and verifies session tokens.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: jsonwebtoken::EncodingKey,
    decoding_key: jsonwebtoken::DecodingKey,
    validation: jsonwebtoken::Validation,
    expire_secs: i64,
}

impl JwtService {
    /// Create a new JwtService with an HMAC secret.
    pub fn new(secret: &str, expire_secs: i64) -> Self {
        Self {
            encoding_key: jsonwebtoken::EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: jsonwebtoken::DecodingKey::from_secret(secret.as_bytes()),
            validation: jsonwebtoken::Validation::default(),
            expire_secs,
        }
    }

    /// Issue a signed token for a user.
    pub fn issue(&self, user_id: &str, display_name: &str) -> Result<String, ServiceError> {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            name: display_name.to_string(),
            iat: now,
            exp: now + self.expire_secs,
        };
        jsonwebtoken::encode(&jsonwebtoken::Header::default(), &claims, &self.encoding_key)
            .map_err(|e| ServiceError::Internal(format!("jwt encode: {}", e)))
    }

    /// Verify a token and extract its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, ServiceError> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| ServiceError::Unauthorized(format!("invalid token: {}", e)))
    }
}

impl IdentityProvider for JwtService {
    fn identify(&self, headers: &HeaderMap) -> Result<Identity, ServiceError> {
        let token = bearer_token(headers)
            .ok_or_else(ServiceError::not_logged_in)?;
        let claims = self.verify(token)?;
        Ok(Identity {
            user_id: claims.sub,
            name: claims.name,
        })
    }
}

/// Extract the Bearer token from the Authorization header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .filter(|t| !t.is_empty())
}
