//! # Auth Errors
//!
//! Error types for the authentication module.

use thiserror::Error;

/// Result type for auth operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Authentication and authorization errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    // ==================
    // Token Errors
    // ==================
    /// No token cookie on the request
    #[error("unauthorized access")]
    MissingToken,

    /// Token is not a well-formed JWT
    #[error("Malformed token")]
    MalformedToken,

    /// Token has expired
    #[error("Token expired")]
    TokenExpired,

    /// Signature does not match the server secret
    #[error("Invalid token signature")]
    InvalidSignature,

    // ==================
    // Authorization Errors
    // ==================
    /// Authenticated identity may not access this resource
    #[error("forbidden access")]
    Forbidden,

    // ==================
    // Internal Errors
    // ==================
    /// Token could not be signed
    #[error("Internal error: token generation failed")]
    TokenGenerationFailed,
}

impl AuthError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::MissingToken
            | AuthError::MalformedToken
            | AuthError::TokenExpired
            | AuthError::InvalidSignature => 401,
            AuthError::Forbidden => 403,
            AuthError::TokenGenerationFailed => 500,
        }
    }
}
