//! # writeWave Auth Module
//!
//! Stateless cookie authentication. A client posts its identity to `/jwt`,
//! receives a signed token in an HTTP-only cookie, and protected routes
//! verify that cookie on every request.
//!
//! Logout only clears the cookie. A copied token stays valid until it
//! expires; nothing is revoked server-side.

pub mod cookie;
pub mod errors;
pub mod jwt;

pub use cookie::{CookiePolicy, TOKEN_COOKIE};
pub use errors::{AuthError, AuthResult};
pub use jwt::{Claims, Identity, TokenConfig, TokenManager};
