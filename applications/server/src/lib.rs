//! Shelf Server Library
//!
//! HTTP boundary for the shelf media catalogue: media, collections,
//! memberships and the filtered catalogue view, all scoped by a caller
//! supplied `user_id`.
//!
//! This library exposes the router and its building blocks for testing.

pub mod api;
pub mod config;
pub mod error;
pub mod extract;
pub mod state;

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use state::AppState;
