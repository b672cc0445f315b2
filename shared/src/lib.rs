//! Shared types for the entrance service
//!
//! Domain models, the unified error system, and small utilities used by
//! the server crate and by anything that talks to its HTTP API.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use models::{Location, Pass, Staff, StaffCode, StaffType};
