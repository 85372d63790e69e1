// crates/backend-lib/src/middleware/mod.rs

//! Middleware for the `tokengate` HTTP server.

pub mod auth;

pub use auth::require_auth;
