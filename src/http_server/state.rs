//! Shared handler state.

use std::sync::Arc;

use crate::auth::{CookiePolicy, TokenManager};
use crate::store::DocumentStore;

/// State cloned into every handler
///
/// Holds the single database handle created at startup.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub tokens: Arc<TokenManager>,
    pub cookies: CookiePolicy,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, tokens: TokenManager, cookies: CookiePolicy) -> Self {
        Self {
            store,
            tokens: Arc::new(tokens),
            cookies,
        }
    }
}
