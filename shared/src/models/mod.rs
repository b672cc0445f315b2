//! Data models
//!
//! Shared between the server and API clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` snowflakes.

pub mod location;
pub mod pass;
pub mod staff;

// Re-exports
pub use location::*;
pub use pass::*;
pub use staff::*;
