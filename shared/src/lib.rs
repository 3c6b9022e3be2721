//! Shared types for the Harbor front-desk system
//!
//! Common types consumed by desk-server and by API clients: data models,
//! the unified error system, and the trusted actor identity tuple.

pub mod actor;
pub mod error;
pub mod models;

// Re-exports
pub use actor::{Actor, Role};
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use http;
pub use serde::{Deserialize, Serialize};
