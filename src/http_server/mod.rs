//! # writeWave HTTP Server Module
//!
//! Axum server exposing the blog API.
//!
//! # Endpoints
//!
//! | Method | Path              | Auth   | Purpose                               |
//! |--------|-------------------|--------|---------------------------------------|
//! | GET    | `/`               |        | liveness text                         |
//! | GET    | `/health`         |        | liveness + database ping              |
//! | POST   | `/jwt`            |        | issue the auth cookie                 |
//! | GET    | `/logout`         |        | clear the auth cookie                 |
//! | GET    | `/blogs`          |        | posts, newest first                   |
//! | GET    | `/blogs/table`    |        | posts, longest description first      |
//! | GET    | `/blogs/:id`      |        | one post or `null`                    |
//! | POST   | `/blogs`          |        | create a post                         |
//! | PUT    | `/blogs/:id`      |        | upsert a post                         |
//! | POST   | `/comments`       |        | create a comment                      |
//! | POST   | `/wishlist`       |        | create a wishlist item                |
//! | GET    | `/wishlist/:email`| cookie | items of the signed-in owner          |
//! | DELETE | `/wishlist/:id`   |        | delete a wishlist item                |

pub mod auth_routes;
pub mod blog_routes;
pub mod comment_routes;
pub mod config;
pub mod errors;
pub mod extract;
pub mod health_routes;
pub mod server;
pub mod state;
pub mod wishlist_routes;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult};
pub use extract::AuthenticatedUser;
pub use server::HttpServer;
pub use state::AppState;
