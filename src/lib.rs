//! writeWave - REST backend for the writeWave blogging application
//!
//! Blog posts, comments and per-user wishlists over a document database,
//! with a cookie-carried JWT identity check.

pub mod auth;
pub mod cli;
pub mod config;
pub mod http_server;
pub mod logging;
pub mod model;
pub mod store;
