//! # Auth Cookie
//!
//! Builds the `token` cookie that carries the identity token.
//!
//! In production the front-end lives on another site, so the cookie must be
//! `Secure` and `SameSite=None` to be sent cross-site. Locally it is
//! `SameSite=Strict` over plain HTTP.

use axum_extra::extract::cookie::{Cookie, SameSite};

/// Cookie name carrying the token
pub const TOKEN_COOKIE: &str = "token";

/// Attributes applied to the token cookie
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CookiePolicy {
    production: bool,
}

impl CookiePolicy {
    pub fn new(production: bool) -> Self {
        Self { production }
    }

    fn same_site(&self) -> SameSite {
        if self.production {
            SameSite::None
        } else {
            SameSite::Strict
        }
    }

    /// HTTP-only cookie holding `token`
    pub fn session(&self, token: String) -> Cookie<'static> {
        Cookie::build((TOKEN_COOKIE, token))
            .http_only(true)
            .secure(self.production)
            .same_site(self.same_site())
            .path("/")
            .build()
    }

    /// Cookie that makes the client drop its token immediately
    pub fn removal(&self) -> Cookie<'static> {
        let mut cookie = Cookie::build((TOKEN_COOKIE, ""))
            .http_only(true)
            .secure(self.production)
            .same_site(self.same_site())
            .path("/")
            .build();
        cookie.make_removal();
        cookie
    }
}
