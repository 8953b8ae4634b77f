//! # JWT Token Management
//!
//! Signs a client identity into an HS256 token and validates it again.
//!
//! ## Invariants
//! - Validation is stateless (no database lookup)
//! - Tokens expire after the configured lifetime (7 days by default)
//! - Verifying a freshly issued token yields the identity that was signed

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::errors::{AuthError, AuthResult};

/// Identity a client asks to be signed in as
///
/// Only `email` is interpreted by the server. Any other fields are carried
/// through the token untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub email: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Identity {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            extra: Map::new(),
        }
    }
}

/// JWT claims: the identity plus timing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(flatten)]
    pub identity: Identity,

    /// Issued at (Unix epoch seconds)
    pub iat: i64,

    /// Expiration (Unix epoch seconds)
    pub exp: i64,
}

/// Token signing configuration
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// HMAC secret
    pub secret: String,

    /// Token lifetime
    pub ttl: Duration,
}

impl TokenConfig {
    /// Config with the default 7 day lifetime
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ttl: Duration::days(7),
        }
    }
}

/// Issues and verifies identity tokens
#[derive(Clone)]
pub struct TokenManager {
    ttl: Duration,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenManager {
    pub fn new(config: TokenConfig) -> Self {
        Self {
            ttl: config.ttl,
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
        }
    }

    /// Sign an identity into a token
    pub fn issue(&self, identity: &Identity) -> AuthResult<String> {
        let now = Utc::now();
        let mut identity = identity.clone();
        // Timing claims are ours
        identity.extra.remove("iat");
        identity.extra.remove("exp");

        let claims = Claims {
            identity,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|_| AuthError::TokenGenerationFailed)
    }

    /// Validate a token and return the identity it carries
    pub fn verify(&self, token: &str) -> AuthResult<Identity> {
        let mut validation = Validation::new(Algorithm::HS256);
        // `aud` is an identity field like any other, not checked
        validation.validate_aud = false;

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                _ => AuthError::MalformedToken,
            }
        })?;

        Ok(data.claims.identity)
    }
}
