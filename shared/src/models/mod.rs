//! Data models
//!
//! Shared between desk-server and API clients. Monetary fields are
//! `rust_decimal::Decimal`; stay ranges are `chrono::NaiveDate` under
//! half-open semantics (check-out day is not occupied).

pub mod booking;
pub mod payment;
pub mod room;

// Re-exports
pub use booking::*;
pub use payment::*;
pub use room::*;
